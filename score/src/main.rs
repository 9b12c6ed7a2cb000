//! 形態素列を仮説の連鎖として評価するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ形態素列（1行1文、空白区切り）を一定幅の
//! 拡張に区切り、文頭から順に素性関数を適用して、スコア内訳を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::str::FromStr;

use hypscore::phrase::{Phrase, Sentence, Word};
use hypscore::search::TargetExtension;
use hypscore::{Feature, FeatureState, ScoreBreakdown};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Scores,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "scores" => Ok(Self::Scores),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "score", about = "Scores morpheme sequences with feature functions")]
struct Args {
    /// Stateful feature function line, e.g. "JoinScore vocab-path=vocab.txt multiplier=0.5".
    /// Can be given multiple times.
    #[clap(short = 'f', long = "feature", required = true)]
    features: Vec<String>,

    /// Number of morphemes attached by each hypothesis extension.
    #[clap(short = 'w', long, default_value = "1")]
    width: usize,

    /// Marks morphemes ending with this suffix as out-of-vocabulary.
    /// The suffix is removed from the surface.
    #[clap(short = 'u', long)]
    oov_suffix: Option<String>,

    /// Output mode. Choices are scores and detail.
    #[clap(short = 'O', long, default_value = "scores")]
    output_mode: OutputMode,
}

/// 設定行から素性関数を構築する
///
/// 翻訳候補を持たないこのツールでは状態なしの素性関数は評価できないため、
/// 設定エラーとして拒否します。
fn load_features(lines: &[String]) -> Result<Vec<Feature>, Box<dyn Error>> {
    let mut features = vec![];
    for line in lines {
        let f = Feature::from_line(line, None)?;
        if !f.is_stateful() {
            return Err(format!(
                "{}: only stateful feature functions are supported",
                f.name()
            )
            .into());
        }
        log::info!("Loaded {} ({} scores)", f.name(), f.num_scores());
        features.push(f);
    }
    Ok(features)
}

/// 1行を形態素列に変換する
fn parse_morphemes(line: &str, oov_suffix: Option<&str>) -> Vec<Word> {
    line.split_whitespace()
        .map(|tok| match oov_suffix.and_then(|s| tok.strip_suffix(s)) {
            Some(surface) => Word::oov(surface),
            None => Word::new(tok),
        })
        .collect()
}

fn format_state(state: &FeatureState) -> String {
    match state {
        FeatureState::JoinScore(s) => format!(
            "juncture={:?}\tbuffer={:?}",
            s.juncture(),
            s.morphemes().morphemes().to_string()
        ),
    }
}

fn write_scores<W: Write>(out: &mut W, scores: &ScoreBreakdown) -> Result<(), Box<dyn Error>> {
    for (name, values) in scores.iter_sorted() {
        out.write_all(name.as_bytes())?;
        for v in values {
            write!(out, "\t{v}")?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// 1文を評価する
///
/// 状態の不変条件が破れた場合はエラーを返し、その文の評価を中断します。
fn score_sentence<W: Write>(
    features: &[Feature],
    morphemes: &[Word],
    width: usize,
    mode: &OutputMode,
    out: &mut W,
) -> Result<ScoreBreakdown, Box<dyn Error>> {
    let input = Sentence::new(morphemes.iter().cloned().collect());
    let mut states: Vec<Option<FeatureState>> =
        features.iter().map(|f| f.empty_state(&input)).collect();
    let mut scores = ScoreBreakdown::new();

    let mut extensions: Vec<Phrase> = morphemes
        .chunks(width)
        .map(|c| c.iter().cloned().collect())
        .collect();
    // an empty line is a single empty extension that completes the sentence
    if extensions.is_empty() {
        extensions.push(Phrase::new());
    }
    let n = extensions.len();

    for (i, target) in extensions.into_iter().enumerate() {
        let hypo = TargetExtension::new(target.clone(), i + 1 == n);
        let mut delta = ScoreBreakdown::new();
        for (f, state) in features.iter().zip(states.iter_mut()) {
            *state = f.evaluate_when_applied(&hypo, state.as_ref(), &mut delta)?;
        }
        if let OutputMode::Detail = mode {
            writeln!(out, "#{i}\t{target}")?;
            for (f, state) in features.iter().zip(&states) {
                if let Some(state) = state {
                    writeln!(out, "{}\t{}", f.name(), format_state(state))?;
                }
            }
            write_scores(out, &delta)?;
        }
        scores.plus_equals_all(&delta);
    }
    Ok(scores)
}

/// メイン関数
///
/// 素性関数を設定行から構築し、標準入力の各行を評価してスコア内訳を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.width == 0 {
        return Err("width must be positive".into());
    }

    eprintln!("Loading feature functions...");
    let features = load_features(&args.features)?;

    eprintln!("Ready to score");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for (lineno, line) in lines.enumerate() {
        let line = line?;
        let morphemes = parse_morphemes(&line, args.oov_suffix.as_deref());
        match score_sentence(&features, &morphemes, args.width, &args.output_mode, &mut out) {
            Ok(scores) => {
                if let OutputMode::Detail = args.output_mode {
                    out.write_all(b"TOTAL\n")?;
                }
                write_scores(&mut out, &scores)?;
            }
            Err(e) => {
                log::error!("line {}: {}", lineno + 1, e);
                out.write_all(b"ERROR\n")?;
            }
        }
        out.write_all(b"EOS\n")?;
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_features() {
        let features = load_features(&[
            "JoinScore score-compound-word=false name=JS0".to_string(),
            "JoinScore score-compound-word=false name=JS1".to_string(),
        ])
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].name(), "JS1");

        assert!(load_features(&["LongerPhrase".to_string()]).is_err());
        assert!(load_features(&["LongerPhrase max-phrase-length=3".to_string()]).is_err());
        assert!(load_features(&["WordPenalty".to_string()]).is_err());
    }

    #[test]
    fn test_parse_morphemes() {
        let words = parse_morphemes("haus+ xyz|UNK +tür", Some("|UNK"));
        assert_eq!(
            words,
            vec![Word::new("haus+"), Word::oov("xyz"), Word::new("+tür")]
        );
        assert!(parse_morphemes("xyz|UNK", None).iter().all(|w| !w.is_oov()));
    }

    #[test]
    fn test_score_sentence() {
        let features =
            vec![Feature::from_line("JoinScore score-compound-word=false", None).unwrap()];
        let morphemes = parse_morphemes("un+ +lock+ +ed", None);
        let mut out = vec![];
        let scores =
            score_sentence(&features, &morphemes, 2, &OutputMode::Detail, &mut out).unwrap();
        assert_eq!(
            scores.scores_for_producer("JoinScore"),
            Some(&[2.0, 1.0, 0.0][..])
        );
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("#0\tun+ +lock+\nJoinScore\tjuncture=BothAttach"));
        assert!(out.contains("#1\t+ed\n"));
    }

    #[test]
    fn test_score_empty_sentence() {
        let features =
            vec![Feature::from_line("JoinScore score-compound-word=false", None).unwrap()];
        let mut out = vec![];
        let scores = score_sentence(&features, &[], 3, &OutputMode::Scores, &mut out).unwrap();
        assert_eq!(
            scores.scores_for_producer("JoinScore"),
            Some(&[1.0, 0.0, 0.0][..])
        );
        assert!(out.is_empty());
    }
}
