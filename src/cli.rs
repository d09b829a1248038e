use crate::libdeck::dataset::ColorPair;
use crate::libdeck::deck::Session;
use colored::Colorize;
use log::debug;
use text_io::read;

#[derive(Debug, PartialEq)]
enum Choice {
    Reveal,
    Next,
    Restart,
    Quit,
    Unknown,
}

impl Choice {
    fn from_str(input: &str) -> Choice {
        match input.trim() {
            "r" => Choice::Reveal,
            "" | "n" | "s" => Choice::Next,
            "a" => Choice::Restart,
            "q" => Choice::Quit,
            _ => Choice::Unknown,
        }
    }
}

/// Linear pass through the session: the terminal stands in for a swipe, so
/// "next card" advances the deck directly instead of going through the
/// gesture controller.
pub fn cli_loop(mut session: Session, colors: &ColorPair) {
    if session.is_empty() {
        println!(
            "{}",
            "This class has no questions yet. Nothing to drill!".yellow()
        );
        return;
    }

    loop {
        if session.is_complete() {
            println!("{}", accent("Deck complete!", colors).bold());
            print!(
                "{} ",
                "Again? (a to start over, anything else to quit):".cyan()
            );
            let input: String = read!("{}\n");
            if Choice::from_str(&input) == Choice::Restart {
                session.reset();
                continue;
            }
            return;
        }

        let leading = format!("{}/{}. ", session.cursor() + 1, session.len());
        let prompt = session
            .current()
            .map(|q| q.prompt.clone())
            .unwrap_or_default();
        println!(
            "{}{}",
            accent(&leading, colors),
            prompt.black().bold().on_white()
        );
        if session.current_revealed() {
            let answer = session
                .current()
                .map(|q| q.answer.clone())
                .unwrap_or_default();
            println!("{}{}", " ".repeat(leading.len()), answer.green());
        }

        print!(
            "{} ",
            "r to reveal/hide, enter for the next card, q to quit:".cyan()
        );
        let input: String = read!("{}\n");
        let choice = Choice::from_str(&input);
        debug!("choice: {:?}", choice);

        match choice {
            Choice::Reveal => session.toggle_reveal(),
            Choice::Next => session.advance(),
            Choice::Quit => {
                println!("{}", "Quitting Early!".cyan());
                return;
            }
            Choice::Restart | Choice::Unknown => {}
        }
    }
}

fn accent(text: &str, colors: &ColorPair) -> colored::ColoredString {
    let (r, g, b) = hex_rgb(&colors.primary);
    text.truecolor(r, g, b)
}

fn hex_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    // Length is in bytes; non-ASCII input would slice mid-character.
    if hex.len() != 6 || !hex.is_ascii() {
        return (0x90, 0x6D, 0x88);
    }
    let channel = |range: &str| u8::from_str_radix(range, 16).unwrap_or(0);
    (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6]))
}
