use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_scorecard_path, save_scorecard_file, ScorecardFile, SubfactorEntry};
use crate::scoring::{describe_rating, FactorName, FactorWeights, Rating, MAX_COMMENT_CHARS};

/// Line-based prompter over any reader/writer pair.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the scorecard was complete");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt user with a message and a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt user with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    fn prompt_weight(&mut self, factor: FactorName, default: f64) -> Result<f64> {
        loop {
            let input = self.prompt_with_default(&format!("{} weight", factor), &default.to_string())?;
            match input.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => return Ok(v),
                _ => self.say("  Invalid: must be a positive number. Try again.")?,
            }
        }
    }

    fn prompt_rating(&mut self, label: &str) -> Result<Option<u8>> {
        loop {
            let input = self.prompt(&format!("  {} rating 1-5 (blank for 3): ", label))?;
            if input.is_empty() {
                return Ok(None);
            }
            match input.parse::<u8>().ok().and_then(Rating::new) {
                Some(r) => return Ok(Some(r.value())),
                None => self.say("  Invalid: enter a whole number from 1 to 5. Try again.")?,
            }
        }
    }

    fn prompt_comment(&mut self, hint: &str) -> Result<String> {
        loop {
            let input = self.prompt(&format!("  Comment ({}): ", hint))?;
            let chars = input.chars().count();
            if chars <= MAX_COMMENT_CHARS {
                return Ok(input);
            }
            self.say(&format!(
                "  Too long: {} characters, limit is {}. Try again.",
                chars, MAX_COMMENT_CHARS
            ))?;
        }
    }
}

/// Ask for weights, then a rating and comment per subfactor.
fn collect_scorecard<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<ScorecardFile> {
    let mut file = ScorecardFile::default();

    p.say("")?;
    p.say("Weights set how much each factor counts. They are normalized to sum to 1.")?;
    if p.prompt_yes_no("Weigh Team, Product and Market equally?", false)? {
        file.equal_weights = true;
    } else {
        let defaults = FactorWeights::default();
        let weights = FactorWeights::new(
            p.prompt_weight(FactorName::Team, defaults.team)?,
            p.prompt_weight(FactorName::Product, defaults.product)?,
            p.prompt_weight(FactorName::Market, defaults.market)?,
        );
        file.weights = Some(weights);
    }

    let scale: Vec<String> = (Rating::MIN..=Rating::MAX)
        .filter_map(|v| describe_rating(v).map(|d| format!("{} {}", v, d)))
        .collect();

    for factor in FactorName::ALL {
        p.say("")?;
        p.say(&format!("{} ({})", factor, scale.join(", ")))?;
        for sub in factor.subfactors() {
            let rating = p.prompt_rating(sub.label())?;
            let comment = p.prompt_comment(sub.description())?;
            if rating.is_some() || !comment.is_empty() {
                file.subfactors.insert(sub, SubfactorEntry { rating, comment });
            }
        }
    }

    Ok(file)
}

/// Run the interactive init wizard to create a scorecard file.
///
/// If `default_path` is Some, uses that as the scorecard path.
/// Otherwise, prompts the user with the default path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut p = Prompter {
        input: stdin.lock(),
        output: std::io::stdout(),
    };

    p.say("")?;
    p.say("Investment Scorecard Wizard")?;
    p.say("===========================")?;

    let file = collect_scorecard(&mut p)?;

    let default_scorecard_path = default_path.unwrap_or_else(get_scorecard_path);
    p.say("")?;
    let path_str = p.prompt_with_default(
        "Where should the scorecard be saved?",
        &default_scorecard_path.display().to_string(),
    )?;
    let path = PathBuf::from(&path_str);

    if path.exists() {
        let overwrite = p.prompt_yes_no(
            &format!("Scorecard already exists at {}. Overwrite?", path.display()),
            false,
        )?;
        if !overwrite {
            p.say("Aborted.")?;
            return Ok(());
        }
    }

    save_scorecard_file(&path, &file)?;

    p.say("")?;
    p.say(&format!("Scorecard written to {}", path.display()))?;
    p.say("Run `scorecard` to see the summary, or `scorecard export` for PDF and CSV.")?;
    Ok(())
}
