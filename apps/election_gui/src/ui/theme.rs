use eframe::egui::Color32;

pub const BACKDROP: Color32 = Color32::from_rgb(0x1b, 0x14, 0x0e);
pub const PANEL: Color32 = Color32::from_rgb(0x2b, 0x21, 0x17);
pub const PANEL_STROKE: Color32 = Color32::from_rgb(0x8a, 0x6a, 0x3c);
pub const TITLE: Color32 = Color32::from_rgb(0xe8, 0xd3, 0xa9);
pub const MUTED: Color32 = Color32::from_rgb(0xa8, 0x98, 0x7c);
pub const VACANT: Color32 = Color32::from_rgb(0x3a, 0x30, 0x26);
pub const NOTICE: Color32 = Color32::from_rgb(0xd9, 0xb8, 0x6a);
