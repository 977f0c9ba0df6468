use ratatui::{
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::ui::model::{LayerRow, LoadView, UiState};

use super::theme::{LABEL_COLUMN_WIDTH, err_style, ok_style, title_style};

pub fn draw_frame<B: Backend>(f: &mut Frame<'_, B>, state: &UiState) {
    let size = f.size();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled("urlprobe", title_style()));
    let inner = block.inner(size);
    f.render_widget(block, size);

    let mut lines = Vec::new();
    lines.push(Line::from(format!("🔍 Probing {}", state.target)));
    lines.push(Line::from(""));

    if state.layers.is_empty() {
        lines.push(Line::from("⏳ Running probes..."));
    } else {
        for row in &state.layers {
            lines.push(layer_row_line(row));
        }
    }

    if let Some(load) = &state.load {
        push_load_lines(&mut lines, load);
    }

    lines.push(Line::from(""));
    lines.push(Line::from("Press q to quit"));

    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(body, inner);
}

fn layer_row_line(row: &LayerRow) -> Line<'_> {
    let status = if row.ok {
        Span::styled("✔", ok_style())
    } else {
        Span::styled("✖", err_style())
    };

    let mut spans = vec![
        Span::raw(format!(
            "{:<width$} ",
            row.layer.label(),
            width = LABEL_COLUMN_WIDTH
        )),
        status,
        Span::raw(format!(" {}ms", row.duration_ms)),
    ];
    if let Some(detail) = &row.detail {
        spans.push(Span::raw(format!(" {}", detail)));
    }
    Line::from(spans)
}

fn push_load_lines(lines: &mut Vec<Line<'_>>, load: &LoadView) {
    lines.push(Line::from(""));
    lines.push(Line::from("⚡ Load Test"));
    lines.push(Line::from(format!("Requests: {}", load.requests)));
    lines.push(Line::from(format!("Concurrency: {}", load.concurrency)));
    lines.push(Line::from(format!("Success: {}", load.success)));
    lines.push(Line::from(format!("Errors: {}", load.errors)));
    if let Some(summary) = load.summary {
        lines.push(Line::from(format!("Avg latency: {}ms", summary.avg_ms)));
        lines.push(Line::from(format!("P95 latency: {}ms", summary.p95_ms)));
    }
}
