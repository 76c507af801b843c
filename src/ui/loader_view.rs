//! Splash screen showing the egg-to-hen loader.

use libadwaita::{
    gtk::{
        Align::Center,
        Box, Label,
        Orientation::{Horizontal, Vertical},
    },
    prelude::{BoxExt, WidgetExt},
};

use crate::{state::LoaderStage, ui::utils::sized_markup};

/// Point size of the stage figure at scale 1.
const FIGURE_BASE_PT: f64 = 64.0;

/// Point size of a progress dot at scale 1.
const DOT_BASE_PT: f64 = 10.0;

/// Full-window splash with the stage figure, label and progress dots.
pub struct LoaderView {
    /// Root widget of the splash.
    pub widget: Box,
    /// Glyph of the displayed stage.
    figure: Label,
    /// Name of the displayed stage.
    stage_label: Label,
    /// One dot per stage, in cycle order.
    dots: Vec<Label>,
}

impl LoaderView {
    /// Creates the splash showing `stage`.
    pub fn new(stage: LoaderStage) -> Self {
        let widget = Box::builder()
            .orientation(Vertical)
            .spacing(24)
            .halign(Center)
            .valign(Center)
            .build();

        let title = Label::builder().use_markup(true).build();
        title.set_markup(&sized_markup("D4 KIENYEJI", "xx-large", None));
        title.add_css_class("loader-title");
        title.add_css_class("title-1");
        widget.append(&title);

        let figure = Label::builder().use_markup(true).height_request(120).build();
        widget.append(&figure);

        let stage_label = Label::builder().use_markup(true).build();
        widget.append(&stage_label);

        let dot_row = Box::builder()
            .orientation(Horizontal)
            .spacing(8)
            .halign(Center)
            .build();
        let dots = LoaderStage::ALL
            .iter()
            .map(|_| {
                let dot = Label::builder().use_markup(true).build();
                dot_row.append(&dot);
                dot
            })
            .collect();
        widget.append(&dot_row);

        let view = Self {
            widget,
            figure,
            stage_label,
            dots,
        };
        view.update(stage);
        view
    }

    /// Redraws the figure, label and dots for `current`.
    pub fn update(&self, current: LoaderStage) {
        let figure = current.figure(current);
        self.figure.set_markup(&sized_markup(
            current.glyph(),
            &format!("{:.0}pt", FIGURE_BASE_PT * figure.scale),
            None,
        ));
        self.figure.set_opacity(figure.opacity);

        self.stage_label.set_markup(&sized_markup(
            current.label(),
            "x-large",
            Some(current.color()),
        ));

        for (stage, dot_label) in LoaderStage::ALL.iter().zip(&self.dots) {
            let dot = stage.dot(current);
            dot_label.set_markup(&sized_markup(
                "●",
                &format!("{:.0}pt", DOT_BASE_PT * dot.scale),
                Some(dot.color),
            ));
        }
    }
}
