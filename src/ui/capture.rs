//! Per-frame widget registry backing click capture and the inspector widget count.
//!
//! Views register the rect and label of the widgets they draw. Click capture runs before any
//! widget of the next frame, so it resolves presses against the previous frame's registry and
//! sees clicks regardless of which widget ends up consuming them.

use crate::devlog::ClickTarget;
use eframe::egui;

/// Widgets drawn during one frame.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    entries: Vec<(egui::Rect, ClickTarget)>,
}

impl WidgetRegistry {
    pub fn register(&mut self, rect: egui::Rect, target: ClickTarget) {
        self.entries.push((rect, target));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rects registered this frame.
    pub fn rects(&self) -> impl Iterator<Item = (egui::Rect, &ClickTarget)> {
        self.entries.iter().map(|(rect, target)| (*rect, target))
    }

    /// Innermost registered widget under `pos`, or an empty target.
    pub fn resolve(&self, pos: egui::Pos2) -> ClickTarget {
        self.entries
            .iter()
            .filter(|(rect, _)| rect.contains(pos))
            .min_by(|(a, _), (b, _)| a.area().total_cmp(&b.area()))
            .map(|(_, target)| target.clone())
            .unwrap_or_default()
    }
}

fn registry_id() -> egui::Id {
    egui::Id::new("widget_registry")
}

/// Takes the registry filled by the previous frame, leaving an empty one for this frame.
pub fn begin_frame(ctx: &egui::Context) -> WidgetRegistry {
    ctx.data_mut(|d| d.remove_temp::<WidgetRegistry>(registry_id()))
        .unwrap_or_default()
}

/// Snapshot of the registry being filled by the current frame.
pub fn current(ctx: &egui::Context) -> WidgetRegistry {
    ctx.data(|d| d.get_temp::<WidgetRegistry>(registry_id()))
        .unwrap_or_default()
}

/// Registers a drawn widget.
pub fn track(ui: &egui::Ui, response: &egui::Response, text: &str, id: &str, class: &str) {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    let target = ClickTarget {
        text: non_empty(text),
        id: non_empty(id),
        class: non_empty(class),
    };
    ui.ctx().data_mut(|d| {
        d.get_temp_mut_or_default::<WidgetRegistry>(registry_id())
            .register(response.rect, target)
    });
}

/// A button that registers itself.
pub fn button(ui: &mut egui::Ui, text: &str, id: &str) -> egui::Response {
    let response = ui.button(text);
    track(ui, &response, text, id, "button");
    response
}

/// A selectable label that registers itself.
pub fn selectable(ui: &mut egui::Ui, selected: bool, text: &str, id: &str) -> egui::Response {
    let response = ui.selectable_label(selected, text);
    track(ui, &response, text, id, "tab");
    response
}

/// Primary-button presses in this frame's raw input.
pub fn primary_presses(ctx: &egui::Context) -> Vec<egui::Pos2> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => Some(*pos),
                _ => None,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(text: &str) -> ClickTarget {
        ClickTarget {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    #[test]
    fn resolve_prefers_innermost_rect() {
        let mut registry = WidgetRegistry::default();
        registry.register(
            egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0)),
            target("card"),
        );
        registry.register(
            egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(50.0, 20.0)),
            target("Open"),
        );
        assert_eq!(registry.resolve(egui::pos2(20.0, 20.0)).describe(), "Open");
        assert_eq!(registry.resolve(egui::pos2(200.0, 200.0)).describe(), "card");
        assert_eq!(registry.resolve(egui::pos2(900.0, 900.0)).describe(), "Unknown");
    }
}
