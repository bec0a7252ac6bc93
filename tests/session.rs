//! End-to-end REPL sessions against the real storage engine.

use mvdict::repl::{run_session, LineSource, GOODBYE};
use mvdict::{CommandHandler, InMemoryStorage, Storage};
use std::future;
use std::sync::atomic::Ordering;
use std::sync::Arc;

async fn session(script: &'static str) -> (String, Arc<InMemoryStorage<String, String>>) {
    session_bytes(script.as_bytes()).await
}

async fn session_bytes(
    script: &'static [u8],
) -> (String, Arc<InMemoryStorage<String, String>>) {
    let storage = Arc::new(InMemoryStorage::new());
    let handler = CommandHandler::new(Arc::clone(&storage));
    let mut source = LineSource::stream(script);
    let mut output = Vec::new();

    run_session(handler, &mut source, &mut output, future::pending())
        .await
        .unwrap();

    (String::from_utf8(output).unwrap(), storage)
}

#[tokio::test]
async fn keys_on_empty_store() {
    let (output, _) = session("KEYS\n").await;
    assert_eq!(output, "(empty set)\n");
}

#[tokio::test]
async fn duplicate_add_is_reported() {
    let (output, storage) = session("ADD foo bar\nADD foo bar\n").await;

    assert_eq!(
        output,
        ") Added\n) ERROR, member already exists for key\n"
    );
    assert_eq!(storage.members(&"foo".to_string()).unwrap(), vec!["bar"]);
}

#[tokio::test]
async fn members_listed_in_insertion_order() {
    let (output, _) = session("ADD foo bar\nADD foo baz\nMEMBERS foo\n").await;
    assert_eq!(output, ") Added\n) Added\n1) bar\n2) baz\n");
}

#[tokio::test]
async fn remove_on_missing_key() {
    let (output, _) = session("REMOVE foo bar\n").await;
    assert_eq!(output, ") ERROR, key does not exist\n");
}

#[tokio::test]
async fn unknown_command_and_bad_arity() {
    let (output, _) = session("blah\nADD\nADD foo\n").await;

    assert_eq!(
        output,
        ") ERROR, Unknown command 'blah'\n\
         ) ERROR, Syntax error; expected ADD <key> <value>\n\
         ) ERROR, Syntax error; expected ADD <key> <value>\n"
    );
}

#[tokio::test]
async fn full_command_tour() {
    let script = "\
ADD foo bar
ADD foo baz
ADD bang bar
KEYS
ITEMS
ALLMEMBERS
KEYEXISTS foo
KEYEXISTS nope
MEMBEREXISTS foo baz
MEMBEREXISTS foo qux
MEMBEREXISTS nope qux
REMOVE foo bar
REMOVE foo bar
REMOVE foo baz
KEYS
MEMBERS foo
REMOVEALL bang
REMOVEALL bang
ADD a 1
CLEAR
ITEMS
";
    let (output, storage) = session(script).await;

    let expected = "\
) Added
) Added
) Added
1) foo
2) bang
1) foo: bar
2) foo: baz
3) bang: bar
1) bar
2) baz
3) bar
) true
) false
) true
) false
) ERROR, key does not exist
) Removed
) ERROR, member does not exist
) Removed
1) bang
) ERROR, key does not exist
) Removed
) ERROR, key does not exist
) Added
) Cleared
(empty set)
";
    assert_eq!(output, expected);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn crlf_input_is_accepted() {
    let (output, _) = session("ADD foo bar\r\nMEMBERS foo\r\n").await;
    assert_eq!(output, ") Added\n1) bar\n");
}

#[tokio::test]
async fn invalid_utf8_line_does_not_end_session() {
    let script = b"ADD foo caf\xe9\nADD foo bar\nMEMBERS foo\n";
    let (output, storage) = session_bytes(script).await;

    assert_eq!(output, ") Added\n) Added\n1) caf\u{FFFD}\n2) bar\n");
    assert_eq!(storage.stats().members, 2);
}

#[tokio::test]
async fn interrupt_mid_session() {
    let storage = Arc::new(InMemoryStorage::new());
    let handler = CommandHandler::new(Arc::clone(&storage));
    let (_client, server) = tokio::io::duplex(64);
    let mut source = LineSource::stream(server);
    let mut output = Vec::new();

    let stats = run_session(handler, &mut source, &mut output, async {})
        .await
        .unwrap();

    assert_eq!(output, GOODBYE.as_bytes());
    assert_eq!(stats.lines_processed.load(Ordering::Relaxed), 0);
}
