// SPDX-License-Identifier: MPL-2.0
//! Toast widgets: individual cards and the six-anchor overlay.
//!
//! Toasts render as small cards with a kind-colored accent border, an
//! optional action button and a dismiss button. The overlay groups visible
//! toasts by their anchor and stacks one aligned layer per anchor; queued
//! toasts are surfaced as a "+N more" badge under the anchor they are
//! waiting for.

use super::dispatcher::Toasts;
use super::host::{Host, Message};
use super::notification::{Notification, Placement};
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, spacing, typography};
use iced::widget::{button, container, mouse_area, stack, text, Column, Container, Row};
use iced::{alignment, Color, Element, Length, Theme};

/// Fixed width of a toast card.
pub const TOAST_WIDTH: f32 = 320.0;

/// Renders a single toast card.
pub fn toast_card(notification: &Notification, host: &Host) -> Element<'static, Message> {
    let id = notification.id();
    let accent = notification.kind().accent_color();
    let alpha = host.opacity(id);

    let glyph = text(notification.kind().glyph())
        .size(typography::BODY_LG)
        .style(move |_theme: &Theme| text::Style {
            color: Some(faded(accent, alpha)),
        });

    let mut lines = Column::new().spacing(spacing::XXS);
    if let Some(heading) = notification.heading_text() {
        lines = lines.push(text(heading.to_owned()).size(typography::BODY).style(
            move |theme: &Theme| text::Style {
                color: Some(faded(theme.palette().text, alpha)),
            },
        ));
    }
    if let Some(body) = notification.body_text() {
        lines = lines.push(text(body.to_owned()).size(typography::BODY_SM).style(
            move |theme: &Theme| text::Style {
                color: Some(faded(theme.palette().text, alpha)),
            },
        ));
    }

    let mut content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Container::new(glyph).padding(spacing::XXS))
        .push(
            Container::new(lines)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        );

    if let Some(action) = notification.action_button() {
        content = content.push(
            button(text(action.label().to_owned()).size(typography::BODY_SM))
                .on_press(Message::ActionPressed(id))
                .padding(spacing::XXS)
                .style(move |theme, status| action_button_style(theme, status, accent)),
        );
    }

    content = content.push(
        button(text("\u{2715}").size(typography::BODY_SM))
            .on_press(Message::Dismiss(id))
            .padding(spacing::XXS)
            .style(dismiss_button_style),
    );

    let card = Container::new(content)
        .width(Length::Fixed(TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent, alpha));

    mouse_area(card)
        .on_enter(Message::HoverEntered(id))
        .on_exit(Message::HoverLeft(id))
        .into()
}

/// Renders the full overlay: one aligned layer per non-empty anchor.
///
/// Returns a zero-sized element when nothing is live so the overlay never
/// intercepts input meant for the screen below it.
pub fn view(toasts: &Toasts, host: &Host) -> Element<'static, Message> {
    toasts.with(|store| {
        let mut layers: Vec<Element<'static, Message>> = Vec::new();

        for placement in Placement::ALL {
            let cards: Vec<Element<'static, Message>> = store
                .active()
                .filter(|n| n.placement_anchor() == Some(placement))
                .map(|n| toast_card(n, host))
                .collect();
            let waiting = store.queued_count_at(placement);
            if cards.is_empty() && waiting == 0 {
                continue;
            }

            let mut column = Column::with_children(cards)
                .spacing(spacing::XS)
                .align_x(horizontal_alignment(placement));
            if waiting > 0 {
                column = column.push(queued_badge(waiting));
            }

            layers.push(
                Container::new(column)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(horizontal_alignment(placement))
                    .align_y(vertical_alignment(placement))
                    .padding(spacing::MD)
                    .into(),
            );
        }

        if layers.is_empty() {
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            stack(layers)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    })
}

/// Small pill showing how many toasts wait behind a full anchor.
fn queued_badge(waiting: usize) -> Element<'static, Message> {
    Container::new(
        text(format!("+{waiting} more"))
            .size(typography::CAPTION)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            }),
    )
    .padding(spacing::XXS)
    .style(|theme: &Theme| badge_container_style(theme))
    .into()
}

/// Maps an anchor to its horizontal screen alignment.
fn horizontal_alignment(placement: Placement) -> alignment::Horizontal {
    match placement {
        Placement::TopLeft | Placement::BottomLeft => alignment::Horizontal::Left,
        Placement::TopCenter | Placement::BottomCenter => alignment::Horizontal::Center,
        Placement::TopRight | Placement::BottomRight => alignment::Horizontal::Right,
    }
}

/// Maps an anchor to its vertical screen alignment.
fn vertical_alignment(placement: Placement) -> alignment::Vertical {
    if placement.is_top() {
        alignment::Vertical::Top
    } else {
        alignment::Vertical::Bottom
    }
}

/// Scales a color's alpha channel for enter/exit fades.
fn faded(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha.clamp(0.0, 1.0),
        ..color
    }
}

/// Style function for the toast card container.
fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let bg = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(faded(
            Color {
                a: opacity::SURFACE,
                ..bg
            },
            alpha,
        ))),
        border: iced::Border {
            color: faded(accent, alpha),
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(faded(theme.palette().text, alpha)),
        ..Default::default()
    }
}

/// Style function for the queued-count badge.
fn badge_container_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..theme.extended_palette().background.strong.color
        })),
        border: iced::Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Style function for the action button.
fn action_button_style(theme: &Theme, status: button::Status, accent: Color) -> button::Style {
    let base = theme.extended_palette().background.base;

    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..accent
            })),
            text_color: base.text,
            border: iced::Border {
                color: accent,
                width: border::WIDTH_SM,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        },
        _ => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border {
                color: accent,
                width: border::WIDTH_SM,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            })),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Pressed => button::Style {
            background: Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::GRAY_400
            })),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let theme = Theme::Dark;
        let accent = palette::SUCCESS_500;
        let style = toast_container_style(&theme, accent, 1.0);

        assert_eq!(style.border.color, accent);
        assert!(style.background.is_some());
    }

    #[test]
    fn faded_scales_alpha_only() {
        let color = Color::from_rgb(0.2, 0.4, 0.6);
        let half = faded(color, 0.5);
        assert!((half.a - 0.5).abs() < f32::EPSILON);
        assert_eq!((half.r, half.g, half.b), (color.r, color.g, color.b));
    }

    #[test]
    fn exit_fade_dims_the_border() {
        let theme = Theme::Dark;
        let accent = palette::ERROR_500;
        let mid_exit = toast_container_style(&theme, accent, 0.4);
        assert!(mid_exit.border.color.a < accent.a);
    }

    #[test]
    fn anchors_map_to_their_screen_corner() {
        assert_eq!(
            horizontal_alignment(Placement::TopLeft),
            alignment::Horizontal::Left
        );
        assert_eq!(
            horizontal_alignment(Placement::BottomCenter),
            alignment::Horizontal::Center
        );
        assert_eq!(
            vertical_alignment(Placement::TopRight),
            alignment::Vertical::Top
        );
        assert_eq!(
            vertical_alignment(Placement::BottomRight),
            alignment::Vertical::Bottom
        );
    }
}
