use crate::output::print_json;
use anyhow::Context;
use tka_core::orientation::compute_end_orientation;
use tka_core::types::{MotionType, Orientation, RotationDirection, Turns};

pub fn run(
    motion_type: MotionType,
    turns: Turns,
    rotation: RotationDirection,
    start: Orientation,
    json: bool,
) -> anyhow::Result<()> {
    let end = compute_end_orientation(motion_type, turns, rotation, start)
        .with_context(|| format!("cannot orient {motion_type} with {turns} turns ({rotation})"))?;

    if json {
        let value = serde_json::json!({
            "motion_type": motion_type,
            "turns": turns,
            "rotation": rotation,
            "start_ori": start,
            "end_ori": end,
        });
        print_json(&value)?;
    } else {
        println!("{end}");
    }
    Ok(())
}
