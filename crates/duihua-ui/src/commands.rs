use duihua_types::{Action, LevelFilter, View};

use crate::state::UiState;

/// What a line of learner input turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Action),
    /// Show or hide one scene line's translation
    Toggle(usize),
    Help,
    Redraw,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  <n>              pick a scenario from the menu, or answer in a scene
  ?<n>             toggle pinyin/English of a scene line (?0 is the NPC)
  r                replay the finished scenario
  f                review flashcards of the finished scenario
  s / n / enter    show answer / next card
  filter <1-6|all> filter the menu by HSK level
  vocab [1-6|all]  show the vocabulary table, loading a level if given
  m                back to the menu
  q                quit";

pub fn parse_command(input: &str, state: &UiState) -> Command {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Command::Send(Action::Quit),
        "m" | "menu" | "b" | "back" => return Command::Send(Action::ReturnToMenu),
        "h" | "help" => return Command::Help,
        "filter" | "level" => {
            return match rest.parse::<LevelFilter>() {
                Ok(filter) => Command::Send(Action::SetFilter(filter)),
                Err(e) => Command::Unknown(e),
            };
        }
        "v" | "vocab" => {
            if rest.is_empty() {
                return Command::Send(Action::ShowVocabulary);
            }
            return match rest.parse::<LevelFilter>() {
                Ok(level) => Command::Send(Action::SelectVocabLevel(level)),
                Err(e) => Command::Unknown(e),
            };
        }
        _ => {}
    }

    match &state.view {
        Some(View::Menu { items, .. }) => match input.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => {
                Command::Send(Action::StartScenario(items[n - 1].key.clone()))
            }
            _ if input.is_empty() => Command::Redraw,
            _ => Command::Unknown(input.to_string()),
        },
        Some(View::Scene { .. }) => {
            if let Some(line) = input.strip_prefix('?') {
                return match line.trim().parse::<usize>() {
                    Ok(line) => Command::Toggle(line),
                    Err(_) => Command::Unknown(input.to_string()),
                };
            }
            match input.parse::<usize>() {
                // Out-of-range answers still go to the session, which rejects them
                Ok(n) if n >= 1 => Command::Send(Action::Choose(n - 1)),
                _ if input.is_empty() => Command::Redraw,
                _ => Command::Unknown(input.to_string()),
            }
        }
        Some(View::Completed { .. }) => match input {
            "r" | "replay" => Command::Send(Action::Replay),
            "f" | "cards" | "flashcards" => Command::Send(Action::ReviewFlashcards),
            "" => Command::Redraw,
            _ => Command::Unknown(input.to_string()),
        },
        Some(View::Flashcard { back, .. }) => match input {
            "s" | "show" => Command::Send(Action::RevealCard),
            "n" | "next" => Command::Send(Action::NextCard),
            "" if back.is_none() => Command::Send(Action::RevealCard),
            "" => Command::Send(Action::NextCard),
            _ => Command::Unknown(input.to_string()),
        },
        _ if input.is_empty() => Command::Redraw,
        _ => Command::Unknown(input.to_string()),
    }
}
