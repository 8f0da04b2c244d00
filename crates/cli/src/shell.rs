//! Line-oriented interactive session over the application state.

use crate::app::{App, Notice};
use crate::launch::Launcher;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

const HELP: &str = "\
commands:
  folder <dir>         choose a folder and list its presentations
  name [words...]      filter by filename substrings (blank clears)
  tag [words...]       filter by tags (blank clears)
  reset                clear both filters
  ls                   show the current listing
  show <n>             show the path and tags of row n
  add <n> <tags...>    add tags to row n
  remove <n> <tags...> remove tags from row n
  open <n>             open row n with the default application
  status               show folder and filters
  help                 this text
  quit                 leave";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Folder(&'a str),
    Name(&'a str),
    Tag(&'a str),
    Reset,
    List,
    Show(Option<usize>),
    Add(Option<usize>, &'a str),
    Remove(Option<usize>, &'a str),
    Open(Option<usize>),
    Status,
    Help,
    Quit,
    Unknown(&'a str),
}

/// Rows are numbered from 1 on screen; anything unparsable is "no selection".
fn parse_index(word: &str) -> Option<usize> {
    word.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

fn split_first(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn parse(line: &str) -> Option<Command<'_>> {
    let (head, rest) = split_first(line);
    if head.is_empty() {
        return None;
    }
    let cmd = match head {
        "folder" | "cd" => Command::Folder(rest),
        "name" => Command::Name(rest),
        "tag" => Command::Tag(rest),
        "reset" => Command::Reset,
        "ls" | "list" => Command::List,
        "show" => Command::Show(parse_index(rest)),
        "add" => {
            let (n, tags) = split_first(rest);
            Command::Add(parse_index(n), tags)
        }
        "remove" | "rm" => {
            let (n, tags) = split_first(rest);
            Command::Remove(parse_index(n), tags)
        }
        "open" => Command::Open(parse_index(rest)),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other),
    };
    Some(cmd)
}

pub fn print_rows<W: Write>(app: &App, out: &mut W) -> Result<()> {
    for (i, row) in app.rows().iter().enumerate() {
        writeln!(out, "{:>4}  {:<40}  {}", i + 1, row.filename, row.tags_joined())?;
    }
    writeln!(out, "{}", app.status_line())?;
    Ok(())
}

fn print_notice<W: Write>(notice: &Notice, out: &mut W) -> Result<()> {
    // Operations without a selection are silent.
    if *notice != Notice::NoSelection {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}

/// Runs commands from `input` until EOF or `quit`.
pub fn run<R: BufRead, W: Write>(
    app: &mut App,
    launcher: &dyn Launcher,
    input: R,
    out: &mut W,
) -> Result<()> {
    if app.current_folder().is_some() {
        print_rows(app, out)?;
    } else {
        writeln!(out, "no folder chosen; use `folder <dir>` (type `help` for commands)")?;
    }
    for line in input.lines() {
        let line = line?;
        let Some(cmd) = parse(&line) else {
            continue;
        };
        match cmd {
            Command::Folder("") => writeln!(out, "usage: folder <dir>")?,
            Command::Folder(dir) => match app.choose_folder(Path::new(dir)) {
                Ok(_) => print_rows(app, out)?,
                Err(e) => writeln!(out, "error: {e:#}")?,
            },
            Command::Name(words) => {
                app.set_filename_input(words);
                print_rows(app, out)?;
            }
            Command::Tag(words) => {
                app.set_tag_input(words);
                print_rows(app, out)?;
            }
            Command::Reset => {
                app.reset();
                print_rows(app, out)?;
            }
            Command::List => print_rows(app, out)?,
            Command::Show(index) => {
                if let Some(row) = index.and_then(|i| app.rows().get(i)) {
                    writeln!(out, "{}", row.file_path)?;
                    writeln!(out, "tags: {}", row.tags_joined())?;
                }
            }
            Command::Add(index, tags) => match app.add_tags(index, tags) {
                Ok(notice) => print_notice(&notice, out)?,
                Err(e) => writeln!(out, "error: {e:#}")?,
            },
            Command::Remove(index, tags) => match app.remove_tags(index, tags) {
                Ok(notice) => print_notice(&notice, out)?,
                Err(e) => writeln!(out, "error: {e:#}")?,
            },
            Command::Open(index) => print_notice(&app.open_selection(index, launcher), out)?,
            Command::Status => {
                let folder = app
                    .current_folder()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".into());
                writeln!(out, "folder: {folder}")?;
                writeln!(out, "name filter: {}", app.filename_input())?;
                writeln!(out, "tag filter: {}", app.tag_input())?;
                writeln!(out, "{}", app.status_line())?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(word) => writeln!(out, "unknown command `{word}`; try `help`")?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_row_commands_one_based() {
        assert_eq!(parse("add 2 x y"), Some(Command::Add(Some(1), "x y")));
        assert_eq!(parse("  rm 1   draft "), Some(Command::Remove(Some(0), "draft")));
        assert_eq!(parse("open 0"), Some(Command::Open(None)));
        assert_eq!(parse("open abc"), Some(Command::Open(None)));
    }

    #[test]
    fn parses_filters_and_blank_lines() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("name"), Some(Command::Name("")));
        assert_eq!(parse("tag  a  b"), Some(Command::Tag("a  b")));
        assert_eq!(parse("folder /tmp/My Decks"), Some(Command::Folder("/tmp/My Decks")));
        assert_eq!(parse("frobnicate"), Some(Command::Unknown("frobnicate")));
    }
}
