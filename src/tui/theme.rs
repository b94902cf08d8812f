use ratatui::style::{Color, Modifier, Style};

/// Wizard palette: dark green ground, parchment text, gold for the active
/// step and green for finished ones.
struct Palette {
    ground: Color,
    panel: Color,
    ink: Color,
    faded: Color,
    gold: Color,
    leaf: Color,
    ochre: Color,
    rust: Color,
}

const PALETTE: Palette = Palette {
    ground: Color::Rgb(16, 20, 18),
    panel: Color::Rgb(24, 30, 27),
    ink: Color::Rgb(226, 220, 200),
    faded: Color::Rgb(122, 128, 112),
    gold: Color::Rgb(201, 168, 76),
    leaf: Color::Rgb(84, 156, 110),
    ochre: Color::Rgb(214, 146, 64),
    rust: Color::Rgb(186, 84, 66),
};

pub fn screen() -> Style {
    Style::default().fg(PALETTE.ink).bg(PALETTE.ground)
}

pub fn panel() -> Style {
    Style::default().fg(PALETTE.ink).bg(PALETTE.panel)
}

pub fn heading() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn accent() -> Style {
    Style::default().fg(PALETTE.gold)
}

pub fn muted() -> Style {
    Style::default().fg(PALETTE.faded)
}

pub fn value() -> Style {
    Style::default().fg(PALETTE.ink).add_modifier(Modifier::BOLD)
}

pub fn done() -> Style {
    Style::default().fg(PALETTE.leaf)
}

/// The projected khatam date.
pub fn outlook() -> Style {
    Style::default().fg(PALETTE.ochre).add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(PALETTE.rust)
}

/// The text being typed, red while it fails validation.
pub fn input(invalid: bool) -> Style {
    let fg = if invalid { PALETTE.rust } else { PALETTE.ochre };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_turns_red_when_invalid() {
        assert_eq!(input(true).fg, error().fg);
        assert_ne!(input(false).fg, input(true).fg);
        assert!(heading().add_modifier.contains(Modifier::BOLD));
    }
}
