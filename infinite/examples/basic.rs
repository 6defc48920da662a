//! Scrolls a simulated surface through a 10k-item feed and prints how the
//! rendered window evolves.
//!
//! Run with: `cargo run --example basic`

use infinite::{Extent, Geometry, LoadOutcome, Surface, Window, WindowOptions};

#[derive(Clone, Copy)]
struct Row {
    index: usize,
    height: u32,
}

struct DemoSurface {
    rows: Vec<Row>,
    scroll_offset: u64,
    viewport_size: u32,
}

impl DemoSurface {
    fn content(&self) -> u64 {
        self.rows.iter().map(|r| r.height as u64).sum()
    }

    fn scroll_to(&mut self, offset: u64) {
        let max = self.content().saturating_sub(self.viewport_size as u64);
        self.scroll_offset = offset.min(max);
    }
}

impl Surface for DemoSurface {
    type Item = Row;

    fn geometry(&self) -> Geometry {
        Geometry {
            scroll_offset: self.scroll_offset,
            viewport_size: self.viewport_size,
            content_size: self.content(),
        }
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_to(offset);
    }

    fn rendered_count(&self) -> usize {
        self.rows.len()
    }

    fn extent(&self, child: usize) -> Extent {
        let start = self.rows[..child].iter().map(|r| r.height as u64).sum();
        Extent {
            start,
            size: self.rows[child].height,
        }
    }

    fn logical_index(&self, child: usize) -> usize {
        self.rows[child].index
    }

    fn append(&mut self, items: Vec<Row>) {
        self.rows.extend(items);
    }

    fn prepend(&mut self, items: Vec<Row>) {
        self.rows.splice(0..0, items);
    }

    fn remove_head(&mut self, count: usize) {
        self.rows.drain(..count);
    }

    fn remove_tail(&mut self, count: usize) {
        let keep = self.rows.len() - count;
        self.rows.truncate(keep);
    }

    fn clear(&mut self) {
        self.rows.clear();
    }
}

fn main() {
    let mut surface = DemoSurface {
        rows: Vec::new(),
        scroll_offset: 0,
        viewport_size: 400,
    };

    let options = WindowOptions::new(|req| {
        // Pretend fetch: 10_000 rows of 24px exist.
        let end = (req.index + req.count).min(10_000);
        if req.index >= end {
            return None;
        }
        Some(
            (req.index..end)
                .map(|i| Row {
                    index: i,
                    height: 24,
                })
                .collect(),
        )
    })
    .with_page_size(50);

    let mut window = Window::new(options);
    window.load_initial(&mut surface);
    println!("initial: {:?}", window.status());

    let mut now_ms = 0u64;
    for step in 1..=8 {
        let target = surface.scroll_offset + 900;
        surface.scroll_to(target);
        now_ms += 150;

        match window.handle_scroll(&mut surface, now_ms) {
            Some(LoadOutcome::Loaded(batch)) => {
                println!(
                    "step {step}: loaded {:?} range={:?} offset={}",
                    batch.range(),
                    window.rendered_range().unwrap(),
                    surface.scroll_offset,
                );
            }
            Some(other) => println!("step {step}: {other:?}"),
            None => println!("step {step}: no edge crossed"),
        }
    }

    // Jump far ahead and keep scrolling from there.
    window.jump_to(&mut surface, 9_000);
    println!("after jump: {:?}", window.status());
}
