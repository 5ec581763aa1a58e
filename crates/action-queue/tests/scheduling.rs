use action_queue::builder::{action, named, once, until, until_named};
use action_queue::{ActionQueue, ActionTable, Arguments, CallableKind, QueueError, Step};
use serde_json::json;
use std::sync::Arc;

#[derive(Default)]
struct Console {
    printed: Vec<String>,
}

fn print(text: &'static str) -> impl FnMut(&mut Console) -> Result<(), String> + Send {
    move |console: &mut Console| {
        console.printed.push(text.to_string());
        Ok(())
    }
}

#[test]
fn print_once_then_drained() {
    let mut queue = ActionQueue::new();
    let mut console = Console::default();
    queue.enqueue(action("print", print("hi")), once()).unwrap();

    assert_eq!(queue.run(&mut console), Ok(true));
    assert_eq!(console.printed, vec!["hi"]);
    assert!(queue.is_empty());
    assert_eq!(queue.run(&mut console), Ok(false));
    assert_eq!(console.printed.len(), 1);
}

#[test]
fn append_until_five_elements() {
    let mut queue = ActionQueue::new();
    let mut list: Vec<u32> = Vec::new();
    queue
        .enqueue(
            action("append", |list: &mut Vec<u32>| -> Result<(), String> {
                list.push(5);
                Ok(())
            }),
            until(|list: &Vec<u32>| Ok(list.len() >= 5)),
        )
        .unwrap();

    let mut ticks = 0;
    while queue.run(&mut list).unwrap() {
        ticks += 1;
    }

    assert_eq!(ticks, 5);
    assert_eq!(list, vec![5; 5]);
    assert!(queue.is_empty());
}

#[test]
fn two_single_shots_one_per_tick() {
    let mut queue = ActionQueue::new();
    let mut console = Console::default();
    queue.enqueue(action("first", print("first")), once()).unwrap();
    queue.enqueue(action("second", print("second")), once()).unwrap();

    assert_eq!(queue.run(&mut console), Ok(true));
    assert_eq!(queue.len(), 1);
    assert_eq!(console.printed, vec!["first"]);

    assert_eq!(queue.run(&mut console), Ok(true));
    assert_eq!(queue.len(), 0);
    assert_eq!(console.printed, vec!["first", "second"]);

    assert_eq!(queue.run(&mut console), Ok(false));
}

#[test]
fn fifo_order_for_single_shots() {
    let mut queue = ActionQueue::new();
    let mut console = Console::default();
    let words = ["walk", "open", "take", "close"];
    for word in words {
        queue.enqueue(action(word, print(word)), once()).unwrap();
    }

    for _ in 0..words.len() {
        assert_eq!(queue.run(&mut console), Ok(true));
    }
    assert_eq!(queue.run(&mut console), Ok(false));
    assert_eq!(console.printed, words);
}

#[test]
fn satisfied_move_is_skipped_and_kick_runs_in_the_same_tick() {
    // "If already in range, skip the move and go straight to the kick"
    let mut queue = ActionQueue::new();
    let mut console = Console::default();
    queue
        .enqueue(action("move", print("move")), until(|_: &Console| Ok(true)))
        .unwrap();
    queue.enqueue(action("kick", print("kick")), once()).unwrap();

    let step = queue.step(&mut console).unwrap();

    assert!(step.performed());
    assert_eq!(step.skipped(), 1);
    assert_eq!(console.printed, vec!["kick"]);
    assert_eq!(queue.step(&mut console), Ok(Step::Idle { skipped: 0 }));
}

#[test]
fn new_batch_discards_unrun_entries() {
    let mut queue = ActionQueue::new();
    let mut console = Console::default();
    queue.enqueue(action("a", print("a")), once()).unwrap();
    queue.enqueue(action("b", print("b")), once()).unwrap();
    queue.enqueue(action("c", print("c")), once()).unwrap();
    queue.run(&mut console).unwrap();

    queue.enqueue(action("d", print("d")), once()).unwrap();

    assert!(!queue.is_running());
    assert_eq!(queue.labels().collect::<Vec<_>>(), vec!["d"]);
    while queue.run(&mut console).unwrap() {}
    assert_eq!(console.printed, vec!["a", "d"]);
}

#[test]
fn drained_queue_still_resets_on_next_batch() {
    let mut queue = ActionQueue::new();
    let mut console = Console::default();
    queue.enqueue(action("a", print("a")), once()).unwrap();
    while queue.run(&mut console).unwrap() {}
    assert!(queue.is_running());

    queue.enqueue(action("b", print("b")), once()).unwrap();
    queue.enqueue(action("c", print("c")), once()).unwrap();

    // Only the first enqueue of the new batch resets; the second appends
    assert_eq!(queue.len(), 2);
    assert!(!queue.is_running());
}

fn console_table() -> Arc<ActionTable<Console, String>> {
    Arc::new(
        ActionTable::new()
            .with_action("say", |console: &mut Console, args: &Arguments| {
                let text: String = args.get(0).map_err(|e| e.to_string())?;
                let times: usize = args.get_named_or("times", 1).map_err(|e| e.to_string())?;
                for _ in 0..times {
                    console.printed.push(text.clone());
                }
                Ok(())
            })
            .with_check("printed_at_least", |console: &Console, args: &Arguments| {
                let count: usize = args.get(0).map_err(|e| e.to_string())?;
                Ok(console.printed.len() >= count)
            }),
    )
}

#[test]
fn named_entries_with_keyword_arguments() {
    let mut queue = ActionQueue::with_table(console_table());
    let mut console = Console::default();
    queue
        .enqueue(
            named("say", Arguments::new().arg("hey").with("times", 2)),
            until_named("printed_at_least", Arguments::new().arg(6)),
        )
        .unwrap();
    queue
        .enqueue_simple("say", vec![json!("bye")], None, vec![])
        .unwrap();

    while queue.run(&mut console).unwrap() {}

    assert_eq!(console.printed.len(), 7);
    assert_eq!(console.printed.last().map(String::as_str), Some("bye"));
}

#[test]
fn not_callable_is_rejected_without_side_effects() {
    let mut queue = ActionQueue::with_table(console_table());
    queue
        .enqueue_simple("say", vec![json!("one")], None, vec![])
        .unwrap();

    let err = queue
        .enqueue_simple("nofunc", vec![], None, vec![])
        .unwrap_err();
    assert_eq!(
        err,
        QueueError::InvalidCallable {
            kind: CallableKind::Action,
            name: "nofunc".to_string(),
        }
    );

    let err = queue
        .enqueue_simple("say", vec![json!("two")], Some("nofunc"), vec![])
        .unwrap_err();
    assert_eq!(err.to_string(), "completion check `nofunc` is not callable");

    assert_eq!(queue.len(), 1);
}

#[test]
fn caller_errors_propagate_unchanged() {
    let mut queue = ActionQueue::with_table(console_table());
    let mut console = Console::default();
    // "say" needs a positional argument
    queue.enqueue_simple("say", vec![], None, vec![]).unwrap();

    let err = queue.run(&mut console).unwrap_err();

    assert!(err.contains("missing positional argument 0"));
    assert_eq!(queue.len(), 1);
}
