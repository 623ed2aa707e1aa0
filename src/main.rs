// SPDX-License-Identifier: MPL-2.0
//! Playground binary exercising the notification and prefetch subsystems.
//!
//! Buttons raise toasts of every kind, from inside the update loop and from
//! a simulated background task going through the global dispatcher. A small
//! fake review queue drives the prefetch cache without needing a backend.

use challan_review::config;
use challan_review::media::{PrefetchConfig, PresignedUrl, ReviewQueue, UrlPrefetchCache};
use challan_review::notify::{self, host, overlay, Host, Notification, Placement, Toasts};
use challan_review::ui::design_tokens::{spacing, typography};
use iced::widget::{button, container, row, stack, text, Column, Row};
use iced::{keyboard, time, Element, Length, Subscription, Task, Theme};
use std::time::Duration;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();
    let max_visible: Option<usize> = args.opt_value_from_str("--max-visible").unwrap_or(None);

    let config = config::load().unwrap_or_default();
    let mut store_config = config.store_config();
    if let Some(max_visible) = max_visible {
        store_config.max_visible = max_visible.clamp(1, 10);
    }
    let prefetch_config = config.prefetch_config();

    let toasts = Toasts::new(store_config);
    notify::install_global(toasts.clone());

    let boot = move || Playground::new(toasts.clone(), prefetch_config);
    iced::application(boot, Playground::update, Playground::view)
        .title(Playground::title)
        .theme(Playground::theme)
        .subscription(Playground::subscription)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Host(host::Message),
    RaiseSuccess,
    RaiseError,
    RaiseWarning,
    RaiseInfo,
    RaiseNeutral,
    RaiseWithAction,
    RaiseHighPriority,
    SimulateUpload,
    UploadSettled,
    CyclePlacement,
    ClearAll,
    EscapePressed,
    NextImage,
    PreviousImage,
}

struct Playground {
    toasts: Toasts,
    host: Host,
    placement: Placement,
    sequence: u32,
    queue: ReviewQueue,
    cache: UrlPrefetchCache,
}

impl Playground {
    fn new(toasts: Toasts, prefetch_config: PrefetchConfig) -> (Self, Task<Message>) {
        let queue = ReviewQueue::from_items(
            (1..=9).map(|i| format!("challan-img-{i:03}")).collect(),
        );
        let mut playground = Self {
            toasts,
            host: Host::new(),
            placement: Placement::default(),
            sequence: 0,
            queue,
            cache: UrlPrefetchCache::new(prefetch_config),
        };
        playground.prefetch_ahead();
        (playground, Task::none())
    }

    fn title(&self) -> String {
        String::from("Challan Review Playground")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn next_sequence(&mut self) -> u32 {
        self.sequence += 1;
        self.sequence
    }

    /// Fills the cache for the entries ahead of the cursor. The playground
    /// runs offline, so URLs are minted locally instead of fetched with
    /// `media::fetch_presigned_url`.
    fn prefetch_ahead(&mut self) {
        let window = self.queue.prefetch_window(self.cache.window()).to_vec();
        for id in self.cache.ids_to_prefetch(&window) {
            let url = format!("https://storage.local/{id}?sig=demo");
            self.cache.insert(id, PresignedUrl::new(url, Duration::from_secs(600)));
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Host(message) => {
                self.host.update(message, &self.toasts);
            }
            Message::RaiseSuccess => {
                let n = self.next_sequence();
                self.toasts.push(
                    Notification::success(format!("Challan #{n:04} approved"))
                        .placement(self.placement),
                );
            }
            Message::RaiseError => {
                self.toasts.push(
                    Notification::error("RTA lookup failed")
                        .heading("Registry")
                        .placement(self.placement),
                );
            }
            Message::RaiseWarning => {
                self.toasts.push(
                    Notification::warning("Low image quality score")
                        .placement(self.placement),
                );
            }
            Message::RaiseInfo => {
                let left = self.queue.len();
                self.toasts.push(
                    Notification::info(format!("{left} images left in the queue"))
                        .placement(self.placement),
                );
            }
            Message::RaiseNeutral => {
                self.toasts.push(
                    Notification::neutral("Reviewer note saved").placement(self.placement),
                );
            }
            Message::RaiseWithAction => {
                self.toasts.push(
                    Notification::info("Challan rejected")
                        .placement(self.placement)
                        .action("Undo", || {
                            notify::global().neutral("Rejection undone");
                        }),
                );
            }
            Message::RaiseHighPriority => {
                self.toasts.push(
                    Notification::warning("Plate mismatch flagged for supervisor")
                        .heading("Priority")
                        .priority(5)
                        .placement(self.placement),
                );
            }
            Message::SimulateUpload => {
                self.toasts.info("Uploading 14 photos...");
                return Task::perform(
                    async {
                        tokio::time::sleep(Duration::from_millis(1200)).await;
                        // Background code has no handle; it goes through the
                        // registered global dispatcher.
                        notify::global().error("Bulk upload failed: 2 of 14 photos rejected");
                    },
                    |()| Message::UploadSettled,
                );
            }
            Message::UploadSettled => {}
            Message::CyclePlacement => {
                let anchors = Placement::ALL;
                let index = anchors.iter().position(|p| *p == self.placement).unwrap_or(0);
                self.placement = anchors[(index + 1) % anchors.len()];
            }
            Message::ClearAll => {
                self.toasts.clear_all();
            }
            Message::EscapePressed => {
                self.host.update(host::Message::DismissFront, &self.toasts);
            }
            Message::NextImage => {
                if self.queue.advance().is_some() {
                    self.prefetch_ahead();
                }
            }
            Message::PreviousImage => {
                let _ = self.queue.retreat();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let heading = text("Notification playground").size(typography::TITLE_MD);

        let raise_buttons = Row::new()
            .spacing(spacing::XS)
            .push(control("Success", Message::RaiseSuccess))
            .push(control("Error (sticky)", Message::RaiseError))
            .push(control("Warning", Message::RaiseWarning))
            .push(control("Info", Message::RaiseInfo))
            .push(control("Neutral", Message::RaiseNeutral));

        let behavior_buttons = Row::new()
            .spacing(spacing::XS)
            .push(control("With action", Message::RaiseWithAction))
            .push(control("High priority", Message::RaiseHighPriority))
            .push(control("Background failure", Message::SimulateUpload))
            .push(control("Clear all", Message::ClearAll));

        let anchor_line = row![
            control("Cycle anchor", Message::CyclePlacement),
            text(format!("anchor: {:?}", self.placement)).size(typography::BODY_SM),
        ]
        .spacing(spacing::SM);

        let queue_line = row![
            control("Prev image", Message::PreviousImage),
            control("Next image", Message::NextImage),
            text(format!(
                "reviewing {} (cache holds {} prefetched URLs)",
                self.queue.current().unwrap_or("nothing"),
                self.cache.len(),
            ))
            .size(typography::BODY_SM),
        ]
        .spacing(spacing::SM);

        let stats = self.toasts.with(|store| {
            text(format!(
                "visible {} / queued {}",
                store.active_count(),
                store.queued_count(),
            ))
            .size(typography::CAPTION)
        });

        let controls = Column::new()
            .spacing(spacing::MD)
            .push(heading)
            .push(raise_buttons)
            .push(behavior_buttons)
            .push(anchor_line)
            .push(queue_line)
            .push(stats);

        let content: Element<'_, Message> = container(controls)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::LG)
            .into();

        let toasts = overlay::view(&self.toasts, &self.host).map(Message::Host);

        stack(vec![content, toasts])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let tick = if self.toasts.has_notifications() {
            time::every(host::TICK_INTERVAL)
                .map(|instant| Message::Host(host::Message::Tick(instant)))
        } else {
            Subscription::none()
        };

        let keys = keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed { key, .. } => match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => {
                    Some(Message::EscapePressed)
                }
                _ => None,
            },
            _ => None,
        });

        Subscription::batch([tick, keys])
    }
}

fn control(label: &'static str, message: Message) -> Element<'static, Message> {
    button(text(label).size(typography::BODY_SM))
        .on_press(message)
        .padding(spacing::XS)
        .into()
}
