// Session-level flows through the public core API, no I/O involved.

use std::sync::Arc;

use duihua_config::Config;
use duihua_core::error::SessionError;
use duihua_core::language::DefaultProcessor;
use duihua_core::model::Pack;
use duihua_core::progress::ProgressStore;
use duihua_core::session::{Outcome, Session};
use duihua_core::storage::MemoryStore;
use duihua_core::vocabulary::{VocabEntry, VocabSet};
use duihua_types::{Action, LevelFilter, View};

const PACK: &str = r#"{
    "title": "Basics",
    "scenarios": {
        "greeting": {
            "title": "Greeting",
            "hsk": [1],
            "scenes": [
                {
                    "npc": { "zh": "你好！", "pinyin": "nǐ hǎo", "en": "Hello!", "hsk": 1 },
                    "choices": [
                        { "zh": "你好吗？", "pinyin": "nǐ hǎo ma", "en": "How are you?", "hsk": 1, "next": 1 },
                        { "zh": "再见", "pinyin": "zàijiàn", "en": "Bye", "hsk": 1, "next": "end" }
                    ]
                },
                {
                    "npc": { "zh": "我很好，谢谢。", "pinyin": "wǒ hěn hǎo, xièxie", "en": "I'm fine, thanks.", "hsk": 2 },
                    "choices": [
                        { "zh": "太好了", "pinyin": "tài hǎo le", "en": "Great", "hsk": 2, "next": "menu" }
                    ]
                }
            ]
        },
        "market": {
            "title": "Market",
            "hsk": [2],
            "scenes": [
                {
                    "npc": { "zh": "买什么？", "pinyin": "mǎi shénme", "en": "Buying what?", "hsk": 2 },
                    "choices": [ { "zh": "苹果", "pinyin": "píngguǒ", "en": "Apples", "hsk": 3, "next": "end" } ]
                }
            ]
        }
    }
}"#;

fn word(simplified: &str, level: u8) -> VocabEntry {
    serde_json::from_value(serde_json::json!({
        "simplified": simplified,
        "pinyin": "",
        "meanings": [simplified],
        "level": level,
    }))
    .unwrap()
}

fn session() -> Session {
    let progress = ProgressStore::new(Box::new(MemoryStore::new()), "hsk_progress");
    let mut session = Session::new(&Config::default(), Arc::new(DefaultProcessor), progress);
    let pack: Pack = serde_json::from_str(PACK).unwrap();
    session.apply_packs(vec![pack]);
    session.apply_vocabulary(
        LevelFilter::Level(1),
        VocabSet::from_entries([
            word("你好", 1),
            word("谢谢", 1),
            word("好", 1),
            word("苹果", 3),
        ]),
    );
    session
}

fn render(session: &mut Session, action: Action) -> View {
    match session.handle_action(action).unwrap() {
        Outcome::Render(view) => view,
        other => panic!("expected a view, got {other:?}"),
    }
}

#[test]
fn actions_before_packs_load_are_rejected() {
    let progress = ProgressStore::new(Box::new(MemoryStore::new()), "p");
    let mut session = Session::new(&Config::default(), Arc::new(DefaultProcessor), progress);

    assert!(matches!(session.view(), View::Loading { .. }));
    assert!(matches!(
        session.handle_action(Action::StartScenario("greeting".into())),
        Err(SessionError::NotReady)
    ));
    assert_eq!(session.handle_action(Action::Quit).unwrap(), Outcome::Quit);
}

#[test]
fn actions_after_failed_load_report_the_failure() {
    let progress = ProgressStore::new(Box::new(MemoryStore::new()), "p");
    let mut session = Session::new(&Config::default(), Arc::new(DefaultProcessor), progress);

    let view = session.load_failed("Not found: packs.json");
    assert_eq!(
        view,
        View::LoadFailed {
            message: "Not found: packs.json".into()
        }
    );

    let err = session.handle_action(Action::ShowVocabulary).unwrap_err();
    assert!(matches!(err, SessionError::LoadFailed));
    assert!(!err.to_string().contains("still loading"));
    assert_eq!(session.handle_action(Action::Quit).unwrap(), Outcome::Quit);
}

#[test]
fn menu_lists_scenarios_by_filter() {
    let mut session = session();

    let View::Menu { items, .. } =
        render(&mut session, Action::SetFilter(LevelFilter::Level(2)))
    else {
        panic!("expected menu");
    };
    let keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, ["market"]);
    assert_eq!(items[0].pack.as_deref(), Some("Basics"));

    let View::Menu { items, .. } = render(&mut session, Action::SetFilter(LevelFilter::All)) else {
        panic!("expected menu");
    };
    assert_eq!(items.len(), 2);
}

#[test]
fn playing_through_marks_vocabulary_seen() {
    let mut session = session();

    let View::Scene {
        header,
        npc,
        choices,
    } = render(&mut session, Action::StartScenario("greeting".into()))
    else {
        panic!("expected scene");
    };
    assert_eq!(header, "Greeting — 场景 1 / 2");
    assert_eq!(npc.zh, "你好！");
    assert_eq!(choices.len(), 2);

    let View::Scene { header, .. } = render(&mut session, Action::Choose(0)) else {
        panic!("expected second scene");
    };
    assert_eq!(header, "Greeting — 场景 2 / 2");

    let View::Completed {
        title,
        sheet,
        new_words,
    } = render(&mut session, Action::Choose(0))
    else {
        panic!("expected completion");
    };
    assert_eq!(title, "Greeting");
    assert_eq!(sheet.len(), 5);
    assert_eq!(new_words, ["你好", "好", "谢谢"]);
    assert!(session.progress().is_seen("谢谢"));
    assert!(!session.progress().is_seen("苹果"));

    // Replaying and finishing again records nothing new
    render(&mut session, Action::Replay);
    let View::Completed { new_words, .. } = render(&mut session, Action::Choose(1)) else {
        panic!("expected completion");
    };
    assert!(new_words.is_empty());

    let View::Menu { progress, .. } = render(&mut session, Action::ReturnToMenu) else {
        panic!("expected menu");
    };
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].level, 1);
    assert_eq!(progress[0].seen, 3);
}

#[test]
fn cheat_sheet_highlights_above_filter() {
    let mut session = session();
    render(&mut session, Action::SetFilter(LevelFilter::Level(2)));
    render(&mut session, Action::StartScenario("market".into()));

    let View::Completed { sheet, .. } = render(&mut session, Action::Choose(0)) else {
        panic!("expected completion");
    };
    let flagged: Vec<bool> = sheet.iter().map(|row| row.above_level).collect();
    assert_eq!(flagged, [false, true]);
}

#[test]
fn unknown_scenario_returns_to_menu() {
    let mut session = session();
    assert!(matches!(
        render(&mut session, Action::StartScenario("missing".into())),
        View::Menu { .. }
    ));
}

#[test]
fn invalid_choice_keeps_scene() {
    let mut session = session();
    render(&mut session, Action::StartScenario("greeting".into()));

    assert!(matches!(
        session.handle_action(Action::Choose(5)),
        Err(SessionError::Engine(_))
    ));
    assert!(matches!(session.view(), View::Scene { .. }));
}

#[test]
fn flashcards_reveal_and_finish() {
    let mut session = session();
    render(&mut session, Action::StartScenario("market".into()));
    render(&mut session, Action::Choose(0));

    let View::Flashcard {
        position,
        total,
        front,
        back,
    } = render(&mut session, Action::ReviewFlashcards)
    else {
        panic!("expected flashcard");
    };
    assert_eq!((position, total), (0, 2));
    assert_eq!(front, "买什么？");
    assert!(back.is_none());

    let View::Flashcard { back, .. } = render(&mut session, Action::RevealCard) else {
        panic!("expected flashcard");
    };
    assert_eq!(back.map(|b| b.en), Some("Buying what?".to_string()));

    render(&mut session, Action::NextCard);
    assert_eq!(render(&mut session, Action::NextCard), View::FlashcardsDone);
}

#[test]
fn vocabulary_selection_requests_a_load() {
    let mut session = session();
    assert_eq!(
        session.handle_action(Action::SelectVocabLevel(LevelFilter::All)).unwrap(),
        Outcome::LoadVocabulary(LevelFilter::All)
    );

    let view = session.apply_vocabulary(LevelFilter::All, VocabSet::from_entries([word("好", 1)]));
    let View::Vocabulary { selection, rows } = view else {
        panic!("expected vocabulary table");
    };
    assert_eq!(selection, Some(LevelFilter::All));
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].seen);
}
