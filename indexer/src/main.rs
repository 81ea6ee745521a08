mod persist;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use persist::{load_index, save_corpus, save_documents, save_meta, IndexPaths, MetaFile};
use relevance::{add_document, find_relevant_documents, find_relevant_for_phrase, CorpusIndex, DocumentIndex, Score, StemmingTokenizer};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    body: String,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query Okapi BM25+ relevance indexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
    },
    /// Rank indexed documents against a short phrase
    Search {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: String,
        /// Phrase to look for
        #[arg(long)]
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Rank indexed documents by similarity to the text of a file
    Similar {
        /// Index directory
        #[arg(long, default_value = "./index")]
        index: String,
        /// Text file whose contents are the query
        #[arg(long)]
        input: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_index(&input, &output),
        Commands::Search { index, query, limit } => {
            let (corpus, docs) = load_index(&IndexPaths::new(&index))?;
            let hits = find_relevant_for_phrase(&query, limit, &corpus, &docs, &StemmingTokenizer)?;
            print_hits(&hits)
        }
        Commands::Similar { index, input, limit } => {
            let (corpus, docs) = load_index(&IndexPaths::new(&index))?;
            let text = fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
            let hits = find_relevant_documents(&text, limit, &corpus, &docs, &StemmingTokenizer)?;
            print_hits(&hits)
        }
    }
}

fn build_index(input: &str, output: &str) -> Result<()> {
    let out_paths = IndexPaths::new(output);
    let input_docs = read_input(Path::new(input))?;

    let tokenizer = StemmingTokenizer::new();
    let mut corpus = CorpusIndex::new();
    let mut docs: Vec<DocumentIndex<String>> = Vec::with_capacity(input_docs.len());
    for doc in input_docs {
        docs.push(add_document(&mut corpus, &doc.body, doc.id, &tokenizer)?);
    }
    tracing::info!(
        num_docs = corpus.documents_number(),
        num_terms = corpus.terms().count(),
        words = corpus.words_in_all_documents(),
        "ingested documents"
    );

    save_corpus(&out_paths, &corpus)?;
    save_documents(&out_paths, &docs)?;
    let meta = MetaFile {
        num_docs: corpus.documents_number(),
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        version: relevance::VERSION,
    };
    save_meta(&out_paths, &meta)?;

    tracing::info!(output, "index build complete");
    Ok(())
}

/// Collects documents from a `.json`/`.jsonl` file or every such file under a directory.
fn read_input(input_path: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input_path.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "skipping JSON that is neither an object nor an array"),
    }
    Ok(())
}

fn hit_json(doc_id: &str, score: &Score) -> serde_json::Value {
    let per_word: BTreeMap<&str, f64> = score.per_word.iter().map(|(t, s)| (t.as_str(), *s)).collect();
    serde_json::json!({
        "doc_id": doc_id,
        "score": score.total,
        "per_word": per_word,
    })
}

fn print_hits(hits: &[(&String, Score)]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (doc_id, score) in hits {
        writeln!(out, "{}", hit_json(doc_id, score))?;
    }
    Ok(())
}
