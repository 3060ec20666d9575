//! Print the projected sphere position of every built-in location.

use terraglobe_core::{builtin_locations, lat_lon_to_point};

fn main() -> anyhow::Result<()> {
    let radius = 1.02;

    println!("Pin positions on the r = {} sphere:", radius);
    for location in builtin_locations() {
        let p = lat_lon_to_point(location.coordinate, radius);
        println!(
            "  {:<14} lat {:>9.4} lon {:>9.4} -> ({:+.4}, {:+.4}, {:+.4}) |p| = {:.6}",
            location.label,
            location.coordinate.latitude,
            location.coordinate.longitude,
            p.x,
            p.y,
            p.z,
            p.coords.norm()
        );
    }

    Ok(())
}
