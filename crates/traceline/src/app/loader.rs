//! Background signal loader
//!
//! Expanded year groups show a per-event "signals" block (citations, code
//! availability, headline figures). Those lines are derived off the input
//! thread and arrive asynchronously, after the expansion has already
//! rendered with a placeholder - which changes the group's height and
//! funnels into the controller's layout-change path like any other late
//! content settlement.

use super::types::{DetailRequest, DetailResponse};
use crate::data::Dataset;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub(crate) fn spawn(dataset: Dataset) -> (Sender<DetailRequest>, Receiver<DetailResponse>) {
    let (req_tx, req_rx) = mpsc::channel::<DetailRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<DetailResponse>();

    thread::spawn(move || {
        while let Ok(req) = req_rx.recv() {
            let lines = signal_lines(&dataset, &req.case_id, req.year);
            let response = DetailResponse {
                case_id: req.case_id,
                year: req.year,
                lines,
            };
            if resp_tx.send(response).is_err() {
                break;
            }
        }
    });

    (req_tx, resp_rx)
}

fn signal_lines(dataset: &Dataset, case_id: &str, year: i32) -> Vec<String> {
    let Some(case) = dataset.cases.iter().find(|c| c.id == case_id) else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    for event in case.events_for_year(year) {
        let mut parts = Vec::new();
        if event.citations > 0 {
            parts.push(format!("{} citations", group_thousands(event.citations)));
        }
        parts.push(if event.code_available {
            "code released".to_string()
        } else {
            "no public code".to_string()
        });
        if let Some(metric) = &event.metric {
            parts.push(format!("{}: {}", metric.label, metric.value));
        }
        lines.push(parts.join(" · "));
    }
    lines
}

fn group_thousands(n: u32) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
