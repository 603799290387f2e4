use rand::rngs::StdRng;
use rand::SeedableRng;
use star_field::prelude::*;
use star_field_examples::init_tracing;
use tracing::info;

const FRAME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = FieldConfig::new(80)
        .with_min_star_distance(12.0)
        .with_flicker(0.3, (0.1, 0.4), 0.1)
        .with_scroll_enabled(false);

    let mut display = NullDisplay::new();
    let mut rng = StdRng::seed_from_u64(99);
    let mut field = StarField::initialize(config, 400.0, 800.0, &mut display, &mut rng)?;
    info!(stars = field.stars().len(), "field ready, tracing 3s of flicker");

    let mut bursts = 0usize;
    let mut min_alpha = f32::MAX;

    for frame in 0..180 {
        let mut sink = FnSink::new(|event| {
            if let FieldEvent::FlickerBurst { star_indices } = event {
                bursts += 1;
                info!(frame, stars = star_indices.len(), "flicker burst");
            }
        });
        field.tick_with_events(FRAME, &mut display, &mut rng, &mut sink)?;

        for star in field.stars() {
            min_alpha = min_alpha.min(star.alpha);
        }
    }

    info!(bursts, min_alpha, "timeline finished");
    field.teardown(&mut display);
    Ok(())
}
