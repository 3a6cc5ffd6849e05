//! Drive a dropdown from the terminal.
//!
//! Enter opens/commits, arrows and PageUp/PageDown navigate, letters type
//! into the search box, Backspace edits it, Esc closes, `q` quits while
//! closed. Logs go to `jselect.log`.

use std::fs::File;
use std::io::{Write, stdout};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use formdom::{Document, Element, NodeId, UiEvent};
use jselect::{DropdownConfig, LocaleTable, Registry, TRIGGER_ATTR, class};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("jselect.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut doc = Document::new();
    let source = build_source(&mut doc)?;
    let mut registry = Registry::new(LocaleTable::with_defaults());
    registry.scan(&mut doc)?;
    let Some(name) = registry.by_source(source).map(|d| d.name().to_string()) else {
        return Ok(());
    };
    if let Some(dropdown) = registry.get(&name) {
        doc.focus(dropdown.nodes().display);
    }

    terminal::enable_raw_mode()?;
    let result = run(&mut doc, &mut registry, &name);
    terminal::disable_raw_mode()?;
    result
}

fn build_source(doc: &mut Document) -> Result<NodeId, formdom::DomError> {
    let config = DropdownConfig::new().search(true);
    let mut element = Element::new("select")
        .name("fruit")
        .attr(TRIGGER_ATTR, "jselect");
    config.apply_to(&mut element);
    let select = doc.create(element);
    let root = doc.root();
    doc.append_child(root, select)?;

    let citrus = doc.create(Element::new("optgroup").attr("label", "Citrus"));
    doc.append_child(select, citrus)?;
    for (title, value) in [("Lemon", "lemon"), ("Lime", "lime"), ("Orange", "orange")] {
        let option = doc.create(Element::new("option").text(title).value(value));
        doc.append_child(citrus, option)?;
    }
    for (title, value) in [("Apple", "apple"), ("Banana", "banana"), ("Cherry", "cherry")] {
        let option = doc.create(
            Element::new("option")
                .text(title)
                .value(value)
                .data("desc", format!("A fresh {value}")),
        );
        doc.append_child(select, option)?;
    }
    Ok(select)
}

fn run(
    doc: &mut Document,
    registry: &mut Registry,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut query = String::new();
    loop {
        draw(doc, registry, name, &query)?;

        let CtEvent::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        let Some(dropdown) = registry.get(name) else {
            return Ok(());
        };
        let search = dropdown.nodes().search;
        let open = dropdown.is_open();

        let ui_event = match (key_event.code, search) {
            (KeyCode::Char('q'), _) if !open => return Ok(()),
            (KeyCode::Char(c), Some(search)) if open => {
                query.push(c);
                UiEvent::Input {
                    target: search,
                    value: query.clone(),
                }
            }
            (KeyCode::Backspace, Some(search)) if open => {
                query.pop();
                UiEvent::Input {
                    target: search,
                    value: query.clone(),
                }
            }
            _ => key_event.into(),
        };
        registry.dispatch(doc, &ui_event)?;

        for fired in doc.drain_events() {
            log::info!("event {} on {:?}", fired.name, fired.target);
        }
    }
}

fn draw(
    doc: &Document,
    registry: &Registry,
    name: &str,
    query: &str,
) -> std::io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    let Some(dropdown) = registry.get(name) else {
        return Ok(());
    };

    let mut lines = vec![
        format!("[{}]", doc.text_content(dropdown.nodes().display)),
        format!("value = {:?}", dropdown.value()),
    ];
    if dropdown.is_open() {
        lines.push(format!("search: {query}"));
        for &row in doc.children(dropdown.nodes().list) {
            let Some(element) = doc.get(row) else {
                continue;
            };
            let marker = match (
                element.has_class(class::FOCUS),
                element.has_class(class::SELECTED),
            ) {
                (true, true) => "> *",
                (true, false) => ">  ",
                (false, true) => "  *",
                (false, false) => "   ",
            };
            let indent = if element.has_class(class::GROUP) { "" } else { marker };
            lines.push(format!("{indent} {}", doc.text_content(row)));
        }
    }

    for (y, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        write!(out, "{line}")?;
    }
    out.flush()
}
