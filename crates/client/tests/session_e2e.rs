use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hexviewer_client::tui::{Input, Tui};
use hexviewer_client::{SessionConfig, Viewer};
use hexviewer_core::TextEncoding;
use hexviewer_core::layout::{HEIGHT, WIDTH};
use ratatui::backend::TestBackend;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_for(bytes: &[u8], rainbow: bool) -> (NamedTempFile, SessionConfig) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    let config = SessionConfig {
        path: file.path().to_path_buf(),
        encoding: TextEncoding::for_label("ascii").unwrap(),
        rainbow,
    };
    (file, config)
}

fn key(c: char) -> std::io::Result<Input> {
    Ok(Input::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
}

fn screen_row(tui: &Tui<TestBackend>, row: u16) -> String {
    let buffer = tui.backend().buffer();
    (0..WIDTH).map(|x| buffer[(x, row)].symbol()).collect()
}

#[test]
fn ten_byte_file_shows_one_partial_row() {
    let (_file, config) = config_for(b"0123456789", false);
    let mut viewer = Viewer::open(&config).unwrap();
    viewer.render().unwrap();

    assert!(viewer.state().is_end());
    let row = viewer.canvas().row_text(2);
    assert!(row.starts_with(" 0x0000000 | 30 31 32 33 34 35 36 37 38 39 "));
    let cells: Vec<&str> = row[13..61].split_whitespace().collect();
    assert_eq!(cells.len(), 10);
    assert!(viewer.canvas().row_text(3).trim_start().starts_with('|'));

    viewer.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));
    viewer.handle_key(KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE));
    assert_eq!(viewer.state().position(), 0);
}

#[test]
fn toggling_char_mode_twice_restores_grid() {
    let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
    let (_file, config) = config_for(&data, false);
    let mut viewer = Viewer::open(&config).unwrap();
    viewer.render().unwrap();
    viewer.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));
    let before: Vec<String> = (0..HEIGHT).map(|r| viewer.canvas().row_text(r)).collect();

    viewer.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    assert!(viewer.canvas().row_text(5).contains(" @  A  B  C"));
    viewer.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));

    let after: Vec<String> = (0..HEIGHT).map(|r| viewer.canvas().row_text(r)).collect();
    assert_eq!(before, after);
    assert_eq!(viewer.state().position(), 16);
}

#[test]
fn run_loop_draws_and_quits() {
    let (_file, config) = config_for(&[0u8; 300], true);
    let mut viewer = Viewer::open(&config).unwrap();
    let mut tui = Tui::with_backend(TestBackend::new(WIDTH, HEIGHT)).unwrap();

    let inputs = vec![key('s'), key('h'), Ok(Input::Resize), key('q'), key('s')];
    viewer.run(&mut tui, inputs).unwrap();

    assert_eq!(viewer.state().position(), 16);
    assert!(viewer.state().help_shown());
    assert!(screen_row(&tui, 0).starts_with(" HexViewer | 00 01"));
    assert!(screen_row(&tui, 2).contains("Help for HexViewer."));
    assert!(screen_row(&tui, 19).contains("File      | /"));
    assert!(screen_row(&tui, 20).contains("300 b"));
}

#[test]
fn run_loop_stops_on_input_error() {
    let (_file, config) = config_for(b"abc", false);
    let mut viewer = Viewer::open(&config).unwrap();
    let mut tui = Tui::with_backend(TestBackend::new(WIDTH, HEIGHT)).unwrap();

    let inputs = vec![key('m'), Err(std::io::Error::other("tty gone"))];
    let err = viewer.run(&mut tui, inputs).unwrap_err();
    assert!(err.to_string().contains("tty gone"));
    assert!(screen_row(&tui, 2).contains(" a  b  c"));
}

#[test]
fn truncated_file_shows_error_and_recovers() {
    let (file, config) = config_for(&[7u8; 64], false);
    let mut viewer = Viewer::open(&config).unwrap();
    viewer.render().unwrap();

    file.as_file().set_len(0).unwrap();
    viewer.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    assert!(viewer.state().error_shown());
    assert!(viewer.canvas().row_text(2).contains("Exception!"));

    std::fs::write(file.path(), [9u8; 8]).unwrap();
    viewer.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    assert!(!viewer.state().error_shown());
    assert!(viewer.canvas().row_text(2).contains("09 09"));
}
