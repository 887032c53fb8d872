//! Drives a donut chart from an in-memory grocery collection and writes SVG
//! snapshots of a few interesting moments.

use anyhow::Result;
use kurbo::{Point, Vec2};
use livepie::{LiveDonut, MemoryCollection, Record};
use std::sync::Arc;

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let collection = Arc::new(MemoryCollection::new());
    let mut live = LiveDonut::new(collection.clone());

    collection.insert(Record::new("1", "milk", 12.0));
    collection.insert(Record::new("2", "bread", 30.0));
    collection.insert(Record::new("3", "eggs", 18.0));
    live.pump();
    live.advance(1000.0);
    live.to_svg_file("donut-initial.svg")?;

    // bread gets cheaper; the chart re-balances
    collection.update(Record::new("2", "bread", 10.0))?;
    live.pump();
    live.advance(500.0);
    live.to_svg_file("donut-midtransition.svg")?;
    live.advance(500.0);

    // hover the top of the ring, then click to delete whatever is there
    let center = live.chart().dimensions().center();
    let over_top = center + Vec2::new(0.0, -100.0);
    live.pointer_moved(over_top);
    live.advance(400.0);
    live.to_svg_file("donut-hover.svg")?;

    live.pointer_clicked(over_top);
    live.pointer_moved(Point::new(0.0, 0.0));
    live.pump();
    live.advance(1000.0);
    live.to_svg_file("donut-after-delete.svg")?;

    for notice in live.take_notices() {
        eprintln!("notice: {notice}");
    }
    println!(
        "done; {} records remain: {:?}",
        live.records().len(),
        live.records().iter().map(|r| &r.name).collect::<Vec<_>>()
    );
    Ok(())
}
