use rht_tools::core::init_with_level;
use rht_tools::{run_backproject, RhtRunConfig, RhtTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(log::LevelFilter::Info)?;

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: backproject_table <rht_table.json> [edge_exclusion]");
        return Ok(());
    };

    let mut cfg = RhtRunConfig::default();
    if let Some(e) = std::env::args().nth(2) {
        cfg.backproject.edge_exclusion = e.parse()?;
    }

    let table = RhtTable::load_json(&path)?;
    let image = run_backproject(&table, &cfg)?;
    println!(
        "{}x{} backprojection, {} non-zero pixels, total intensity {:.3}",
        image.width,
        image.height,
        image.nonzero_count(),
        image.sum()
    );

    Ok(())
}
