//! TUI testing utilities using Ratatui's TestBackend
//!
//! Provides helpers for rendering to a test buffer and converting the output
//! to strings for assertions.

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Create a test terminal with standard dimensions (100x30)
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(100, 30)
}

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

/// Row index of the first line containing `text`
pub fn row_of(buffer: &Buffer, text: &str) -> Option<usize> {
    buffer_to_string(buffer)
        .lines()
        .position(|line| line.contains(text))
}

/// Column (in cells) at which `text` first appears on row `y`
pub fn column_of(buffer: &Buffer, y: u16, text: &str) -> Option<u16> {
    let area = buffer.area;
    let first = text.chars().next()?.to_string();
    (area.x..area.x + area.width).find(|&x| {
        buffer.cell((x, y)).map(|c| c.symbol()) == Some(first.as_str())
            && text.chars().enumerate().all(|(i, ch)| {
                buffer
                    .cell((x + i as u16, y))
                    .map(|c| c.symbol() == ch.to_string())
                    .unwrap_or(false)
            })
    })
}
