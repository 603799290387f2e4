use rand::rngs::StdRng;
use rand::SeedableRng;
use star_field::prelude::*;
use star_field_examples::init_tracing;
use tracing::info;

const FRAME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = FieldConfig::new(60)
        .with_min_star_distance(16.0)
        .with_scroll(0.5, 0.5, Easing::QuadInOut)
        .with_flicker_enabled(false);

    let mut display = NullDisplay::new();
    let mut rng = StdRng::seed_from_u64(7);
    let mut field = StarField::initialize(config, 400.0, 800.0, &mut display, &mut rng)?;

    let total = field.state().total_scrollable_height();
    info!(total_scrollable_height = total, "field ready");

    // Eight triggers: enough to watch the offset walk the field and wrap
    // twice without ever growing past the field height.
    let mut sink = FnSink::new(|event| match event {
        FieldEvent::ScrollStarted { from, to } => info!("scroll {from:.1} -> {to:.1}"),
        FieldEvent::ScrollWrapped { from_offset } => {
            info!("wrapped: anchor jumped from {from_offset:.1} back to 0")
        }
        FieldEvent::ScrollFinished { offset } => info!("settled at {offset:.1}"),
        _ => {}
    });

    for _ in 0..8 {
        field.trigger_scroll_with_events(&mut sink);
        while field.is_scrolling() {
            field.tick_with_events(FRAME, &mut display, &mut rng, &mut sink)?;
        }
        assert!(field.scroll_offset() <= total);
    }

    field.teardown(&mut display);
    Ok(())
}
