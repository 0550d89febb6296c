use sigil_canonical::{canonicalize, encode_points, SigilPoint};

fn main() {
    // A square drawn counter-clockwise, starting from its bottom-right corner.
    let drawn: Vec<SigilPoint> = ["1, 1", "1, 0", "0, 0", "0, 1", "1, 1"]
        .iter()
        .map(|text| text.parse().expect("valid point"))
        .collect();

    match canonicalize(&encode_points(&drawn)) {
        Some(key) => {
            let points: Vec<String> = key.points().iter().map(ToString::to_string).collect();
            println!("{key}  [{}]", points.join("] ["));
        }
        None => {
            eprintln!("sigil is not valid");
            std::process::exit(1);
        }
    }
}
