use std::collections::BTreeSet;
use std::fmt::Write;

use duihua_types::{DisplayLine, LevelFilter, SheetRow, View, VocabRow};

pub fn render(view: &View, revealed: &BTreeSet<usize>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = match view {
        View::Loading { message } => writeln!(out, "… {message}"),
        View::LoadFailed { message } => {
            writeln!(out, "Failed to load content: {message}")
        }
        View::Menu {
            filter,
            items,
            progress,
        } => render_menu(&mut out, *filter, items, progress),
        View::Scene {
            header,
            npc,
            choices,
        } => render_scene(&mut out, header, npc, choices, revealed),
        View::Completed {
            title,
            sheet,
            new_words,
        } => render_completed(&mut out, title, sheet, new_words),
        View::Flashcard {
            position,
            total,
            front,
            back,
        } => render_flashcard(&mut out, *position, *total, front, back.as_ref()),
        View::FlashcardsDone => writeln!(
            out,
            "✅ All flashcards reviewed!\n  m) 返回主菜单 (Return to Main Menu)"
        ),
        View::Vocabulary { selection, rows } => render_vocabulary(&mut out, *selection, rows),
    };
    out
}

fn render_menu(
    out: &mut String,
    filter: LevelFilter,
    items: &[duihua_types::MenuItem],
    progress: &[duihua_types::LevelProgress],
) -> std::fmt::Result {
    writeln!(out, "=== 对话 Dialogues (filter: {filter}) ===")?;
    if items.is_empty() {
        writeln!(out, "  (no scenarios at this level)")?;
    }
    for (i, item) in items.iter().enumerate() {
        let levels = item
            .levels
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(out, "  {}. {} [HSK {levels}]", i + 1, item.title)?;
        if let Some(pack) = &item.pack {
            write!(out, " ({pack})")?;
        }
        writeln!(out)?;
    }

    if !progress.is_empty() {
        writeln!(out, "Progress:")?;
        for level in progress {
            writeln!(out, "  {}: {} seen", level.label, level.seen)?;
        }
    }
    writeln!(
        out,
        "<n> play · filter <1-6|all> · vocab [level] · h help · q quit"
    )
}

fn render_scene(
    out: &mut String,
    header: &str,
    npc: &DisplayLine,
    choices: &[DisplayLine],
    revealed: &BTreeSet<usize>,
) -> std::fmt::Result {
    writeln!(out, "{header}")?;
    writeln!(out, "NPC: {}", npc.zh)?;
    if revealed.contains(&0) {
        writeln!(out, "     {} / {}", npc.pinyin, npc.en)?;
    }
    for (i, choice) in choices.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, choice.zh)?;
        if revealed.contains(&(i + 1)) {
            writeln!(out, "     {} / {}", choice.pinyin, choice.en)?;
        }
    }
    writeln!(out, "<n> answer · ?<n> translate (?0 for NPC) · m menu")
}

fn render_completed(
    out: &mut String,
    title: &str,
    sheet: &[SheetRow],
    new_words: &[String],
) -> std::fmt::Result {
    writeln!(out, "🎉 场景完成！ Completed: {title}")?;
    writeln!(out, "  r) 重玩本场景 (Replay this scenario)")?;
    writeln!(out, "  m) 返回主菜单 (Return to Main Menu)")?;
    writeln!(out, "  f) 复习卡片 (Review Flashcards)")?;
    if !new_words.is_empty() {
        writeln!(out, "New words: {}", new_words.join(", "))?;
    }

    writeln!(out, "Cheat sheet:")?;
    writeln!(out, "    Chinese | Pinyin | English | HSK")?;
    for row in sheet {
        // Lines above the learner's level get a marker
        let mark = if row.above_level { "!" } else { " " };
        let line = &row.line;
        writeln!(
            out,
            "  {mark} {} | {} | {} | {}",
            line.zh, line.pinyin, line.en, line.hsk
        )?;
    }
    Ok(())
}

fn render_flashcard(
    out: &mut String,
    position: usize,
    total: usize,
    front: &str,
    back: Option<&DisplayLine>,
) -> std::fmt::Result {
    writeln!(out, "Card {} / {total}", position + 1)?;
    writeln!(out, "    {front}")?;
    match back {
        None => writeln!(out, "  s) Show Answer"),
        Some(line) => {
            writeln!(out, "    {}", line.pinyin)?;
            writeln!(out, "    {}", line.en)?;
            writeln!(out, "    HSK {}", line.hsk)?;
            writeln!(out, "  n) Next Card")
        }
    }
}

fn render_vocabulary(
    out: &mut String,
    selection: Option<LevelFilter>,
    rows: &[VocabRow],
) -> std::fmt::Result {
    let Some(selection) = selection else {
        return writeln!(out, "No vocabulary loaded. Try `vocab 1` or `vocab all`.");
    };

    writeln!(out, "Vocabulary (level: {selection}, {} words)", rows.len())?;
    writeln!(out, "  Word | Pinyin | Meanings | Level | Status")?;
    for row in rows {
        let status = if row.seen { "Seen" } else { "New" };
        writeln!(
            out,
            "  {} | {} | {} | {} | {status}",
            row.simplified, row.pinyin, row.meanings, row.level_label
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use duihua_types::{LevelProgress, MenuItem};

    use super::*;

    fn line(zh: &str, pinyin: &str, en: &str, hsk: u8) -> DisplayLine {
        DisplayLine {
            zh: zh.into(),
            pinyin: pinyin.into(),
            en: en.into(),
            hsk,
        }
    }

    #[test]
    fn menu_lists_items_in_order() {
        let view = View::Menu {
            filter: LevelFilter::Level(1),
            items: vec![
                MenuItem {
                    key: "greet".into(),
                    title: "Greeting".into(),
                    pack: Some("Basics".into()),
                    levels: vec![1, 2],
                },
                MenuItem {
                    key: "shop".into(),
                    title: "Shopping".into(),
                    pack: None,
                    levels: vec![1],
                },
            ],
            progress: vec![LevelProgress {
                level: 1,
                label: "HSK 1 (Beginner)".into(),
                seen: 3,
            }],
        };

        let text = render(&view, &BTreeSet::new());
        assert!(text.contains("filter: 1"));
        assert!(text.contains("1. Greeting [HSK 1/2] (Basics)"));
        assert!(text.contains("2. Shopping [HSK 1]"));
        assert!(text.contains("HSK 1 (Beginner): 3 seen"));
        assert!(text.find("Greeting") < text.find("Shopping"));
    }

    #[test]
    fn scene_hides_translations_until_toggled() {
        let view = View::Scene {
            header: "Greeting — 场景 1 / 2".into(),
            npc: line("你好！", "nǐ hǎo", "Hello!", 1),
            choices: vec![line("你好吗？", "nǐ hǎo ma", "How are you?", 1)],
        };

        let hidden = render(&view, &BTreeSet::new());
        assert!(hidden.contains("Greeting — 场景 1 / 2"));
        assert!(hidden.contains("NPC: 你好！"));
        assert!(hidden.contains("1) 你好吗？"));
        assert!(!hidden.contains("Hello!"));

        let shown = render(&view, &BTreeSet::from([1]));
        assert!(shown.contains("nǐ hǎo ma / How are you?"));
        assert!(!shown.contains("Hello!"));
    }

    #[test]
    fn completed_marks_rows_above_level() {
        let view = View::Completed {
            title: "Shopping".into(),
            sheet: vec![
                SheetRow {
                    line: line("买", "mǎi", "buy", 1),
                    above_level: false,
                },
                SheetRow {
                    line: line("苹果", "píngguǒ", "apple", 3),
                    above_level: true,
                },
            ],
            new_words: vec!["买".into()],
        };

        let text = render(&view, &BTreeSet::new());
        assert!(text.starts_with("🎉 场景完成！ Completed: Shopping"));
        assert!(text.contains("New words: 买"));
        assert!(text.contains("    买 | mǎi | buy | 1"));
        assert!(text.contains("  ! 苹果 | píngguǒ | apple | 3"));
    }

    #[test]
    fn flashcard_shows_back_once_revealed() {
        let front = View::Flashcard {
            position: 0,
            total: 2,
            front: "买".into(),
            back: None,
        };
        let text = render(&front, &BTreeSet::new());
        assert!(text.contains("Card 1 / 2"));
        assert!(text.contains("Show Answer"));

        let back = View::Flashcard {
            position: 0,
            total: 2,
            front: "买".into(),
            back: Some(line("买", "mǎi", "buy", 1)),
        };
        let text = render(&back, &BTreeSet::new());
        assert!(text.contains("HSK 1"));
        assert!(text.contains("Next Card"));
    }

    #[test]
    fn vocabulary_rows_show_status() {
        let view = View::Vocabulary {
            selection: Some(LevelFilter::Level(1)),
            rows: vec![
                VocabRow {
                    simplified: "你".into(),
                    pinyin: "nǐ".into(),
                    meanings: "you".into(),
                    level: 1,
                    level_label: "HSK 1 (Beginner)".into(),
                    seen: true,
                },
                VocabRow {
                    simplified: "好".into(),
                    pinyin: "hǎo".into(),
                    meanings: "good; well".into(),
                    level: 1,
                    level_label: "HSK 1 (Beginner)".into(),
                    seen: false,
                },
            ],
        };

        let text = render(&view, &BTreeSet::new());
        assert!(text.contains("你 | nǐ | you | HSK 1 (Beginner) | Seen"));
        assert!(text.contains("好 | hǎo | good; well | HSK 1 (Beginner) | New"));

        let empty = View::Vocabulary {
            selection: None,
            rows: Vec::new(),
        };
        assert!(render(&empty, &BTreeSet::new()).contains("No vocabulary loaded"));
    }
}
