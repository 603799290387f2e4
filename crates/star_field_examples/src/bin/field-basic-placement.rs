use rand::rngs::StdRng;
use rand::SeedableRng;
use star_field::prelude::*;
use star_field_examples::{init_tracing, render_field_to_png, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A phone-ish viewport; the field covers twice its height.
    let (viewport_w, viewport_h) = (540.0, 540.0);

    let config = FieldConfig::new(120)
        .with_size_range(2.0, 14.0)
        .with_size_bias(2.5)
        .with_min_star_distance(24.0)
        .with_max_placement_attempts(30)
        .with_flicker_enabled(false);

    let mut display = NullDisplay::new();
    let mut rng = StdRng::seed_from_u64(2025);

    let mut sink = VecSink::new();
    let field = StarField::initialize_with_events(
        config,
        viewport_w,
        viewport_h,
        &mut display,
        &mut rng,
        &mut sink,
    )?;

    let report = field.report();
    info!(
        placed = report.placed,
        requested = report.requested,
        skipped = sink.count_of(FieldEventKind::StarSkipped),
        "placement finished"
    );

    let out = "field-basic-placement.png";
    render_field_to_png(&field, &RenderConfig::default(), out)?;
    info!("wrote {out}");

    Ok(())
}
