//! `dice roll`: one non-interactive roll.

use dice_core::{parse_roll_expression, Threshold, Tray, DIE_SIDES};
use tracing::warn;

use crate::RollArgs;

fn format_roll(tray: &Tray, threshold: Option<u8>) -> String {
    let faces: Vec<String> = tray.dice().iter().map(|d| d.value.to_string()).collect();
    let mut out = format!("{}\nsum: {}\n", faces.join(" "), tray.sum());
    if let Some(t) = threshold {
        out.push_str(&format!("successes: {} (>= {t})\n", tray.count_at_least(t)));
    }
    out
}

/// Runs the `dice roll` command.
pub fn run(args: &RollArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let roll = parse_roll_expression(&args.expr)?;
    if roll.sides != u32::from(DIE_SIDES) {
        warn!(sides = roll.sides, "dice are six-sided; the side count is ignored");
    }
    let threshold = match &args.threshold {
        Some(text) => Some(Threshold::default().update_from_text(text)?),
        None => None,
    };

    let mut tray = match args.seed {
        Some(seed) => Tray::with_seed(seed),
        None => Tray::new(),
    };
    tray.set_sorted(args.sorted);
    tray.roll(roll.amount as usize);

    print!("{}", format_roll(&tray, threshold));
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(expr: &str) -> RollArgs {
        RollArgs {
            expr: expr.to_string(),
            seed: Some(3),
            sorted: false,
            threshold: None,
        }
    }

    #[test]
    fn seeded_output_lists_faces_and_sum() {
        let mut tray = Tray::with_seed(3);
        tray.set_sorted(true);
        tray.roll(5);
        let text = format_roll(&tray, Some(4));
        let lines: Vec<&str> = text.lines().collect();
        let faces: Vec<u32> = lines[0].split(' ').map(|f| f.parse().unwrap()).collect();
        assert_eq!(faces.len(), 5);
        assert!(faces.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(lines[1], format!("sum: {}", faces.iter().sum::<u32>()));
        let hits = faces.iter().filter(|&&f| f >= 4).count();
        assert_eq!(lines[2], format!("successes: {hits} (>= 4)"));
    }

    #[test]
    fn valid_expression_succeeds() {
        assert_eq!(run(&args("4d6")).unwrap(), 0);
        assert_eq!(run(&args("2d20")).unwrap(), 0);
    }

    #[test]
    fn invalid_expression_is_an_error() {
        assert!(run(&args("d6")).is_err());
        assert!(run(&args("4x6")).is_err());
    }

    #[test]
    fn bad_threshold_is_an_error() {
        let mut a = args("1d6");
        a.threshold = Some("9".to_string());
        let err = run(&a).unwrap_err();
        assert_eq!(err.to_string(), "Please provide number between 1 and 6");
    }
}
