use cli::app::App;
use cli::launch::{LaunchError, Launcher};
use cli::paths::DataPaths;
use cli::shell;
use pptview_core::scanner::ScanOptions;
use std::fs;
use std::io::Cursor;
use std::path::Path;

struct NullLauncher;

impl Launcher for NullLauncher {
    fn launch(&self, _path: &Path) -> Result<(), LaunchError> {
        Ok(())
    }
}

fn session(app: &mut App, script: &str) -> String {
    let mut out = Vec::new();
    shell::run(app, &NullLauncher, Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn scripted_session_tags_and_filters() {
    let temp = tempfile::tempdir().unwrap();
    let decks = temp.path().join("decks");
    fs::create_dir_all(&decks).unwrap();
    fs::write(decks.join("only.pptx"), b"").unwrap();
    let data = DataPaths::in_dir(temp.path().join("data"));
    let mut app = App::open(&data, ScanOptions::default());

    let script = format!(
        "folder {}\nadd 1 finance draft\ntag finance\nremove 1 draft\nremove 1 finance\nreset\nremove 1 finance\nadd 9 x\nquit\nls\n",
        decks.display()
    );
    let out = session(&mut app, &script);

    assert!(out.contains("no folder chosen"));
    assert!(out.contains("found 1 file(s) (filtered)"));
    assert!(out.contains("added finance draft"));
    assert!(out.contains("remaining tags finance"));
    assert!(out.contains("all tags removed"));
    assert!(out.contains("has no tags"));
    // Nothing after `quit` runs and a bad row index prints nothing.
    assert_eq!(out.matches("found 1 file(s)").count(), 3);
    assert!(!out.contains("added x"));
}

#[test]
fn unknown_commands_and_bad_folders_do_not_stop_the_session() {
    let temp = tempfile::tempdir().unwrap();
    let data = DataPaths::in_dir(temp.path().join("data"));
    let mut app = App::open(&data, ScanOptions::default());

    let script = format!(
        "bogus\nfolder {}\nstatus\n",
        temp.path().join("missing").display()
    );
    let out = session(&mut app, &script);
    assert!(out.contains("unknown command `bogus`"));
    assert!(out.contains("error:"));
    assert!(out.contains("folder: (none)"));
}
