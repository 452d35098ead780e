use console::Style;
use once_cell::sync::Lazy;

pub struct Styles {
    pub position: Style,
    pub title: Style,
    pub meta: Style,
    pub time: Style,
    pub required: Style,
    pub kind: Style,
}

pub static STYLES: Lazy<Styles> = Lazy::new(|| Styles {
    position: Style::new().yellow(),
    title: Style::new().bold(),
    meta: Style::new().dim(),
    time: Style::new().color256(246).italic(),
    required: Style::new().red(),
    kind: Style::new().cyan(),
});
