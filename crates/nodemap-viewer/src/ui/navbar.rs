use bevy_egui::{egui, EguiContexts};

pub struct NavLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const NAV_LINKS: [NavLink; 2] = [
    NavLink {
        label: "Stacks Explorer",
        url: "https://explorer.hiro.so/",
    },
    NavLink {
        label: "About Stacks",
        url: "https://www.stacks.co/",
    },
];

pub const TITLE: &str = "Stacks Node Map";
const NEW_TAB_GLYPH: &str = "⮳";
const NAV_BG: egui::Color32 = egui::Color32::from_rgb(0x14, 0x14, 0x1a);
const BRAND: egui::Color32 = egui::Color32::from_rgb(0x55, 0x46, 0xff);

pub fn link_text(link: &NavLink) -> String {
    format!("{} {}", link.label, NEW_TAB_GLYPH)
}

pub fn navbar(mut contexts: EguiContexts) {
    egui::TopBottomPanel::top("navbar")
        .frame(
            egui::Frame::none()
                .fill(NAV_BG)
                .inner_margin(egui::Margin::symmetric(10.0, 6.0)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                brand_logo(ui, 30.0);
                ui.add_space(6.0);
                ui.label(egui::RichText::new(TITLE).color(egui::Color32::WHITE));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // right-to-left: last link first
                    for link in NAV_LINKS.iter().rev() {
                        ui.add(
                            egui::Hyperlink::from_label_and_url(link_text(link), link.url)
                                .open_in_new_tab(true),
                        );
                    }
                });
            });
        });
}

fn brand_logo(ui: &mut egui::Ui, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, size * 0.2, BRAND);

    let stroke = egui::Stroke::new(size * 0.08, egui::Color32::WHITE);
    let inner = rect.shrink(size * 0.22);
    let upper = inner.top() + inner.height() * 0.4;
    let lower = inner.top() + inner.height() * 0.6;
    let upper_mid = egui::pos2(inner.center().x, upper);
    let lower_mid = egui::pos2(inner.center().x, lower);

    painter.line_segment([egui::pos2(inner.left(), upper), egui::pos2(inner.right(), upper)], stroke);
    painter.line_segment([egui::pos2(inner.left(), lower), egui::pos2(inner.right(), lower)], stroke);
    painter.line_segment([inner.left_top(), upper_mid], stroke);
    painter.line_segment([inner.right_top(), upper_mid], stroke);
    painter.line_segment([inner.left_bottom(), lower_mid], stroke);
    painter.line_segment([inner.right_bottom(), lower_mid], stroke);
}
