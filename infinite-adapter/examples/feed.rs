//! Binds a simulated surface through the registry and scrolls both ways.
//!
//! Run with: `cargo run --example feed`

use infinite::{LoadOutcome, WindowOptions};
use infinite_adapter::{Bindings, Row, VecSurface};

fn main() {
    let mut surface = VecSurface::new(300);
    let mut bindings = Bindings::<&str, Row>::new();

    let options = WindowOptions::new(|req| {
        let end = (req.index + req.count).min(5_000);
        if req.index >= end {
            return None;
        }
        Some(
            (req.index..end)
                .map(|i| Row {
                    index: i,
                    height: 30,
                })
                .collect(),
        )
    })
    .with_page_size(20)
    .with_start_index(2_000);

    bindings.bind("feed", &mut surface, options);
    report("bound", &surface, &bindings);

    let mut now_ms = 0u64;

    // Scroll down a few screens.
    for _ in 0..4 {
        surface.scroll_to(surface.scroll_offset() + 280);
        now_ms += 120;
        if let Some(LoadOutcome::Loaded(batch)) = bindings.on_scroll(&"feed", &mut surface, now_ms)
        {
            println!("appended {:?}", batch.range());
        }
    }
    report("after scrolling down", &surface, &bindings);

    // Then back up toward the start of the window.
    for _ in 0..6 {
        surface.scroll_to(surface.scroll_offset().saturating_sub(280));
        now_ms += 120;
        if let Some(LoadOutcome::Loaded(batch)) = bindings.on_scroll(&"feed", &mut surface, now_ms)
        {
            println!("prepended {:?}", batch.range());
        }
    }
    report("after scrolling up", &surface, &bindings);

    bindings.unbind(&"feed");
    println!("unbound; {} rows left rendered", surface.rows().len());
}

fn report(label: &str, surface: &VecSurface, bindings: &Bindings<&str, Row>) {
    let range = bindings.window(&"feed").and_then(|w| w.rendered_range());
    println!(
        "{label}: rows={} range={range:?} offset={}",
        surface.rows().len(),
        surface.scroll_offset(),
    );
}
