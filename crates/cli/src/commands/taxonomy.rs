//! `quadrax taxonomy`: Print a reference table.

use quadrax_core::knowledge::{Taxonomy, TaxonomyRecord};

pub fn run(kind: &str) -> Result<(), Box<dyn std::error::Error>> {
    let taxonomy = match kind.to_lowercase().as_str() {
        "fasteners" => Taxonomy::Fasteners,
        "screws" => Taxonomy::Screws,
        other => return Err(format!("Unknown taxonomy '{other}', expected fasteners or screws").into()),
    };

    for record in taxonomy.records() {
        print!("{}", render(record));
    }

    Ok(())
}

fn render(record: &TaxonomyRecord) -> String {
    let mut out = format!("{} ({})\n  {}\n", record.kind, record.class, record.description);
    for variant in record.variants {
        out.push_str(&format!("  - {}: {}\n", variant.name, variant.description));
    }
    out
}
