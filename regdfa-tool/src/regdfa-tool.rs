#![allow(clippy::uninlined_format_args)]

use regdfa::{phases, Alphabet, Dfa, Graph, Options, Preset};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "regdfa-tool")]
struct Opt {
    /// The regular expression.
    pattern: String,

    /// The alphabet, like "{a,b,c}" or "a,b,c".
    #[structopt(long, short, conflicts_with = "preset")]
    alphabet: Option<String>,

    /// A named alphabet: binary, abc or hex.
    #[structopt(long, short)]
    preset: Option<Preset>,

    /// Dump the regex with explicit concatenation to stdout.
    #[structopt(long)]
    dump_normalized: bool,

    /// Dump the postfix form to stdout.
    #[structopt(long)]
    dump_postfix: bool,

    /// Dump the NFA to stdout.
    #[structopt(long)]
    dump_nfa: bool,

    /// Dump the DFA to stdout.
    #[structopt(long)]
    dump_dfa: bool,

    /// Dump all compilation phases to stdout.
    #[structopt(long)]
    dump_phases: bool,

    /// Write the DFA as a Graphviz DOT file.
    #[structopt(long)]
    dot: Option<PathBuf>,

    /// Maximum number of NFA states.
    #[structopt(long)]
    nfa_budget: Option<usize>,

    /// Maximum number of DFA states.
    #[structopt(long)]
    dfa_budget: Option<usize>,

    /// The words to evaluate.
    #[structopt(conflicts_with = "file")]
    inputs: Vec<String>,

    /// Evaluate each line of a specified file.
    #[structopt(long, conflicts_with = "inputs")]
    file: Option<PathBuf>,
}

/// Escape a string for use in a DOT label.
fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a DFA graph in Graphviz DOT format.
fn render_dot(graph: &Graph) -> String {
    let mut dot = String::from("digraph DFA {\n  rankdir=LR;\n  empty [label = \"\" shape = plaintext];\n");
    for node in &graph.nodes {
        let shape = if node.is_final {
            "doublecircle"
        } else {
            "circle"
        };
        let style = if node.is_trap { " style = dashed" } else { "" };
        dot.push_str(&format!(
            "  \"{}\" [shape = {}{}];\n",
            dot_escape(&node.name),
            shape,
            style
        ));
    }
    for node in graph.nodes.iter().filter(|n| n.is_start) {
        dot.push_str(&format!(
            "  empty -> \"{}\" [label = \"start\"];\n",
            dot_escape(&node.name)
        ));
    }
    for edge in &graph.edges {
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\" [label = \"{}\"];\n",
            dot_escape(&edge.from),
            dot_escape(&edge.to),
            dot_escape(&edge.label.to_string())
        ));
    }
    dot.push_str("}\n");
    dot
}

/// Evaluate each word, writing verdicts to `out` and errors to `err`.
/// \return whether every word could be evaluated.
fn eval_words<'a, I>(
    dfa: &Dfa,
    words: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<bool>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ok = true;
    for word in words {
        match dfa.evaluate(word) {
            Ok(eval) => writeln!(out, "\"{}\": {}", word, eval)?,
            Err(e) => {
                writeln!(err, "\"{}\": {}", word, e)?;
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn write_dot(path: &Path, dfa: &Dfa) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, render_dot(&dfa.graph()))
        .map_err(|err| format!("{}: {}", path.display(), err).into())
}

fn read_words(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let contents =
        fs::read_to_string(path).map_err(|err| format!("{}: {}", path.display(), err))?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Run the tool. \return whether every word could be evaluated.
fn run(args: &Opt) -> Result<bool, Box<dyn std::error::Error>> {
    let alphabet = match (&args.alphabet, args.preset) {
        (Some(spec), _) => Alphabet::parse(spec)?,
        (None, Some(preset)) => Alphabet::preset(preset),
        (None, None) => {
            return Err("an alphabet is required: pass --alphabet or --preset".into());
        }
    };
    log::info!("alphabet: {}", alphabet);

    let mut options = Options::default();
    if let Some(budget) = args.nfa_budget {
        options.nfa_state_budget = budget;
    }
    if let Some(budget) = args.dfa_budget {
        options.dfa_state_budget = budget;
    }

    alphabet.validate(&args.pattern)?;
    let normalized = phases::normalize(&args.pattern);
    if args.dump_phases || args.dump_normalized {
        println!("Normalized: {}", normalized);
    }
    let postfix = phases::to_postfix(&normalized)?;
    if args.dump_phases || args.dump_postfix {
        println!("Postfix: {}", postfix);
    }
    let nfa = phases::thompson(&postfix, &alphabet, &options)?;
    if args.dump_phases || args.dump_nfa {
        println!("NFA:\n{}", nfa.to_readable_string());
    }
    let dfa = phases::subset(&nfa, &options)?;
    if args.dump_phases || args.dump_dfa {
        println!("{}", dfa.to_readable_string());
    }
    if let Some(ref path) = args.dot {
        write_dot(path, &dfa)?;
    }

    let (stdout, stderr) = (io::stdout(), io::stderr());
    let ok = if let Some(ref path) = args.file {
        let words = read_words(path)?;
        eval_words(
            &dfa,
            words.iter().map(String::as_str),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )?
    } else {
        eval_words(
            &dfa,
            args.inputs.iter().map(String::as_str),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )?
    };
    Ok(ok)
}

fn main() {
    env_logger::init();
    let args = Opt::from_args();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dot() {
        let dfa = regdfa::compile("{0,1}", "0.1*").unwrap();
        let dot = render_dot(&dfa.graph());
        assert!(dot.starts_with("digraph DFA {\n"));
        assert!(dot.contains("  \"q1\" [shape = doublecircle];\n"));
        assert!(dot.contains("  \"qT\" [shape = circle style = dashed];\n"));
        assert!(dot.contains("  empty -> \"q0\" [label = \"start\"];\n"));
        assert!(dot.contains("  \"q0\" -> \"q1\" [label = \"0\"];\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_eval_words_reports_errors_separately() {
        let dfa = regdfa::compile("{0,1}", "0.1*").unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = eval_words(&dfa, ["01", "2"], &mut out, &mut err).unwrap();
        assert!(!ok);
        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert!(out.starts_with("\"01\": accepted"));
        assert!(!out.contains("\"2\""));
        assert_eq!(err, "\"2\": symbol '2' is not in the alphabet\n");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert!(eval_words(&dfa, ["0", "1"], &mut out, &mut err).unwrap());
        assert!(err.is_empty());
    }

    #[test]
    fn test_io_failures_are_errors() {
        let missing = Path::new("/nonexistent/regdfa-tool/words.txt");
        let err = read_words(missing).unwrap_err().to_string();
        assert!(err.starts_with("/nonexistent/regdfa-tool/words.txt: "), "{}", err);

        let dfa = regdfa::compile("{0,1}", "0.1*").unwrap();
        let err = write_dot(Path::new("/nonexistent/regdfa-tool/x.dot"), &dfa).unwrap_err();
        assert!(err.to_string().contains("x.dot"));
    }

    #[test]
    fn test_read_words() {
        let path =
            std::env::temp_dir().join(format!("regdfa-tool-words-{}.txt", process::id()));
        fs::write(&path, "01\n\n011\n").unwrap();
        let words = read_words(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(words, ["01", "", "011"]);
    }

    #[test]
    fn test_run_reports_display_errors() {
        let args = Opt::from_iter(["regdfa-tool", "-a", "{a,b}", "a.c"]);
        let err = run(&args).unwrap_err();
        assert_eq!(err.to_string(), "invalid symbol 'c' at position 2");

        let args = Opt::from_iter(["regdfa-tool", "a"]);
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_dot_escape() {
        assert_eq!(dot_escape("a\"b"), "a\\\"b");
        assert_eq!(dot_escape("\\"), "\\\\");
    }
}
