//! Whole monitor sessions: banner, prompt loop and the command table

mod common;

use common::{lines, ScriptedInput, Session};
use kmon_kernel::config::MONITOR_PROMPT;
use kmon_kernel::monitor::{LineEditor, LineSource};
use kmon_kernel::{BufferConsole, Console};

#[test]
fn help_lists_commands_in_table_order() {
    assert_eq!(
        lines(&Session::default().run(&["help"])),
        [
            "help - Display this list of commands",
            "kerninfo - Display information about the kernel",
            "backtrace - Display backtrace",
            "showmappings - Display mappings between physical address and virtual address",
        ]
    );
}

#[test]
fn kerninfo_reports_symbols_and_footprint() {
    assert_eq!(
        lines(&Session::default().run(&["kerninfo"])),
        [
            "Special kernel symbols:",
            "  _start                  0010000c (phys)",
            "  entry  f010000c (virt)  0010000c (phys)",
            "  etext  f0101a75 (virt)  00101a75 (phys)",
            "  edata  f0112300 (virt)  00112300 (phys)",
            "  end    f0112960 (virt)  00112960 (phys)",
            "Kernel executable memory footprint: 75KB",
        ]
    );
}

#[test]
fn unknown_command_is_reported_and_the_shell_continues() {
    let mut input = ScriptedInput::lines(&["foo", "help"]);
    let out = Session::default().poll_all(&mut input);

    assert!(out.contains("Unknown command 'foo'\n"));
    assert!(out.contains("help - Display this list of commands"));
    assert_eq!(input.prompts, 2);
}

#[test]
fn commands_are_case_sensitive() {
    assert_eq!(Session::default().run(&["HELP"]), "Unknown command 'HELP'\n");
}

#[test]
fn sixteen_tokens_are_too_many() {
    let line = ["help"; 16].join(" ");
    assert_eq!(
        Session::default().run(&[line.as_str()]),
        "Too many arguments (max 16)\n"
    );

    // Fifteen still dispatch; extra arguments are ignored by help
    let line = ["help"; 15].join(" ");
    assert_eq!(lines(&Session::default().run(&[line.as_str()])).len(), 4);
}

#[test]
fn blank_lines_do_nothing() {
    assert_eq!(Session::default().run(&["", "   ", "\t\r\n"]), "");
}

#[test]
fn separators_are_flexible() {
    let plain = Session::default().run(&["kerninfo"]);
    assert_eq!(Session::default().run(&["\t kerninfo \r\n"]), plain);
}

#[test]
fn null_reads_are_skipped() {
    let mut input = ScriptedInput::new([None, Some("help"), None, None, Some("bogus")]);
    let out = Session::default().poll_all(&mut input);

    assert_eq!(input.prompts, 5);
    assert_eq!(out.matches(MONITOR_PROMPT).count(), 5);
    assert!(out.contains("showmappings - Display"));
    assert!(out.ends_with("Unknown command 'bogus'\n"));
}

#[test]
fn handlers_report_success() {
    let session = Session::default();
    let mut console = BufferConsole::new();
    let view = kmon_kernel::KernelView {
        symbols: &session.symbols,
        page_table: &session.pages,
        memory: &session.stack,
        layout: common::jos_layout(),
    };
    let mut monitor = kmon_kernel::Monitor::new(&mut console, view)
        .with_frame_origin(kmon_kernel::FrameOrigin::At(0));
    for line in [
        "help",
        "kerninfo",
        "backtrace",
        "showmappings 0x0",
        "showmappings",
        "nope",
        "",
    ] {
        assert_eq!(monitor.run_command(line), 0, "{line}");
    }
}

#[test]
fn banner() {
    let session = Session::default();
    let mut console = BufferConsole::new();
    let view = kmon_kernel::KernelView {
        symbols: &session.symbols,
        page_table: &session.pages,
        memory: &session.stack,
        layout: common::jos_layout(),
    };
    kmon_kernel::Monitor::new(&mut console, view).greet();
    assert_eq!(
        console.contents(),
        "Welcome to the kernel monitor!\nType 'help' for a list of commands.\n"
    );
}

/// Feeds raw keystrokes through the line editor, like the serial source.
struct Keystrokes {
    bytes: std::vec::IntoIter<u8>,
    editor: LineEditor,
}

impl LineSource for Keystrokes {
    fn read_line(&mut self, prompt: &str, console: &mut dyn Console) -> Option<String> {
        console.write_str(prompt);
        for byte in self.bytes.by_ref() {
            match self.editor.feed(byte, console) {
                kmon_kernel::monitor::Edit::Pending => {}
                kmon_kernel::monitor::Edit::Line(line) => return Some(line),
                kmon_kernel::monitor::Edit::Cancelled => return None,
            }
        }
        None
    }
}

#[test]
fn edited_keystrokes_reach_the_shell() {
    let mut input = Keystrokes {
        bytes: b"kern\x03helq\x7fp\r".to_vec().into_iter(),
        editor: LineEditor::new(),
    };
    let session = Session::default();
    let mut console = BufferConsole::new();
    let view = kmon_kernel::KernelView {
        symbols: &session.symbols,
        page_table: &session.pages,
        memory: &session.stack,
        layout: common::jos_layout(),
    };
    let mut monitor = kmon_kernel::Monitor::new(&mut console, view);
    let _ = monitor.poll(&mut input);
    let _ = monitor.poll(&mut input);
    drop(monitor);

    let out = console.contents();
    assert!(out.starts_with("K> kern^C\nK> helq\x08 \x08p\nhelp - "));
}
