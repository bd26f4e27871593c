//! End-to-end editor scenarios against a booted table.

use semk_core::{
    Config, Context, EditBuffer, HeadlessTerminal, Key, Mode, Namespace, NodeRef, ScreenPos,
    SharedTable,
};

fn booted() -> Context<SharedTable> {
    Context::boot(&Config::default(), false).expect("boot failed")
}

#[test]
fn test_type_save_reopen() {
    let mut ctx = booted();
    let home = ctx.table().resolve("/home/user", NodeRef::Root).unwrap();
    assert_eq!(ctx.cwd(), home);

    let id = ctx.edit("notes.txt").unwrap();
    assert!(ctx.session().buffer().is_empty());

    for key in Key::from_text("hi") {
        ctx.handle_key(key).unwrap();
    }
    ctx.handle_key(Key::Enter).unwrap();
    for key in Key::from_text("there") {
        ctx.handle_key(key).unwrap();
    }
    ctx.handle_key(Key::ExitRequest).unwrap();
    assert_eq!(ctx.session().mode(), Mode::SavePrompt);
    ctx.handle_key(Key::Char(b'y')).unwrap();
    assert_eq!(ctx.session().mode(), Mode::Absent);

    let content = ctx.table().read(id, 2048).unwrap();
    assert_eq!(content, b"hi\nthere");

    // Reopen loads what was saved
    assert_eq!(ctx.edit("NOTES.TXT").unwrap(), id);
    assert_eq!(ctx.session().buffer().as_bytes(), b"hi\nthere");
    assert_eq!(ctx.session().cursor_screen(), ScreenPos::ORIGIN);
}

#[test]
fn test_edit_in_middle_with_navigation() {
    let mut ctx = booted();
    let id = ctx.edit("list.txt").unwrap();

    let mut term = HeadlessTerminal::default();
    term.queue_text("ac\nxyz");
    // Up to row 1 (column clamps to 2), left once, insert between a and c
    term.queue_keys(&[Key::Up, Key::Left, Key::Char(b'b')]);
    term.queue_keys(&[Key::ExitRequest, Key::Char(b'?'), Key::Char(b'y')]);
    ctx.run_editor(&mut term).unwrap();

    assert_eq!(ctx.table().read(id, 100).unwrap(), b"abc\nxyz");
}

#[test]
fn test_screen_follows_edits() {
    let mut ctx = booted();
    ctx.edit("s.txt").unwrap();

    let mut term = HeadlessTerminal::default();
    term.queue_text("hello\nworld");
    term.queue_keys(&[Key::Backspace]);
    ctx.run_editor(&mut term).unwrap();

    assert_eq!(term.row_text(1), "hello");
    assert_eq!(term.row_text(2), "worl");
    assert_eq!(term.cursor(), Some((4, 2)));
}

#[test]
fn test_wrapped_screen() {
    let config: Config = Config::from_json(r#"{"editor": {"wrapWidth": 4}}"#).unwrap();
    let mut ctx = Context::boot(&config, false).unwrap();
    ctx.edit("w.txt").unwrap();

    let mut term = HeadlessTerminal::default();
    term.queue_text("abcdefghij");
    ctx.run_editor(&mut term).unwrap();

    assert_eq!(term.row_text(1), "abcd");
    assert_eq!(term.row_text(2), "efgh");
    assert_eq!(term.row_text(3), "ij");
    assert_eq!(term.cursor(), Some((2, 3)));
}

#[test]
fn test_discard_keeps_original() {
    let mut ctx = booted();
    ctx.edit("hello.txt").unwrap();

    let mut term = HeadlessTerminal::default();
    term.queue_text("XXX");
    term.queue_keys(&[Key::ExitRequest, Key::Char(b'n')]);
    ctx.run_editor(&mut term).unwrap();

    let NodeRef::Entry(id) = ctx.table().lookup("hello.txt", ctx.cwd()).unwrap() else {
        panic!("expected a file");
    };
    assert_eq!(
        ctx.table().read(id, 2048).unwrap(),
        b"Hello from the RAM filesystem!"
    );
}

#[test]
fn test_insert_then_delete_restores_everywhere() {
    let text = b"first line\nsecond, somewhat longer line\n\nend";
    for offset in 0..=text.len() {
        let mut buf = EditBuffer::new(128);
        buf.load(text);
        buf.set_cursor(offset);

        buf.insert_at_cursor(b'#').unwrap();
        assert!(buf.backspace());

        assert_eq!(buf.as_bytes(), text);
        assert_eq!(buf.cursor(), offset);
    }
}

#[test]
fn test_screen_round_trip() {
    let texts: [&[u8]; 4] = [b"", b"abcdefghijklmnop", b"ab\ncd\n\nef", b"exactly8\nnext\n12345678"];
    for text in texts {
        let mut buf = EditBuffer::new(128);
        buf.load(text);
        for wrap in [1, 2, 3, 8, 80] {
            for offset in 0..=buf.len() {
                let pos = buf.offset_to_screen(offset, wrap);
                assert_eq!(buf.screen_to_offset(pos, wrap), offset);
                let length = buf.row_length(pos.row, wrap).unwrap();
                assert!(pos.col <= length && length <= wrap);
            }
            assert_eq!(buf.row_length(buf.last_row(wrap) + 1, wrap), None);
        }
    }
}
