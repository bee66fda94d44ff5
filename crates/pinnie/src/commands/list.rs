use pinnie_core::ipc::{Command, PinnedEntry};

/// Prints the pinned windows, topmost first.
pub fn execute() {
    let response = super::send::request(&Command::List);
    if response.pinned.is_empty() {
        println!("No windows pinned.");
        return;
    }
    for line in format_entries(&response.pinned) {
        println!("{line}");
    }
}

fn format_entries(entries: &[PinnedEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let title = if entry.title.is_empty() {
                "(untitled)"
            } else {
                entry.title.as_str()
            };
            format!("{:>2}. {:#010x}  {title}", i + 1, entry.hwnd)
        })
        .collect()
}
