use seasweeper_core::{CellView, Coord2, Difficulty, SessionState, Snapshot};
use seasweeper_records::ScoreBoard;

const CELL_WIDTH: usize = 3;

/// Character drawn for one cell.
pub fn glyph(view: CellView, triggered: bool) -> char {
    match view {
        CellView { mine: Some(true), .. } if triggered => 'X',
        CellView { mine: Some(true), .. } => '*',
        CellView { flagged: true, .. } => 'F',
        CellView {
            adjacent_mines: Some(0),
            ..
        } => '.',
        CellView {
            adjacent_mines: Some(count),
            ..
        } => char::from_digit(count.into(), 10).unwrap_or('?'),
        _ => '#',
    }
}

/// Board with column numbers on top and row numbers on the left.
pub fn board(snapshot: &Snapshot) -> String {
    let (width, height) = snapshot.size;

    let header: String = (0..width).map(|x| format!("{x:>CELL_WIDTH$}")).collect();
    let mut lines = vec![format!("{:>CELL_WIDTH$}{header}", "")];

    for y in 0..height {
        let row: String = (0..width)
            .map(|x| {
                let coords: Coord2 = (x, y);
                let symbol = snapshot
                    .cell(coords)
                    .map(|view| glyph(view, snapshot.triggered_mine == Some(coords)))
                    .unwrap_or(' ');
                format!("{symbol:>CELL_WIDTH$}")
            })
            .collect();
        lines.push(format!("{y:>CELL_WIDTH$}{row}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn hud(snapshot: &Snapshot) -> String {
    let status = match snapshot.state {
        SessionState::NotStarted => "ready",
        SessionState::InProgress => "playing",
        SessionState::Won => "won",
        SessionState::Lost => "lost",
    };
    format!(
        "[{}] mines left: {}  time: {}s  {}",
        snapshot.difficulty, snapshot.remaining_mines, snapshot.elapsed_secs, status
    )
}

pub fn records(board: &ScoreBoard) -> String {
    let mut lines = Vec::new();
    for tier in Difficulty::ALL {
        lines.push(format!("{tier}:"));
        let entries = board.entries(tier);
        if entries.is_empty() {
            lines.push("  no records".to_owned());
            continue;
        }
        lines.extend(entries.iter().enumerate().map(|(rank, entry)| {
            format!(
                "  {:>2}. {:<16} {:>5}s  {}",
                rank + 1,
                entry.name,
                entry.time,
                entry.date_label().unwrap_or_default()
            )
        }));
    }
    lines.push(String::new());
    lines.join("\n")
}
