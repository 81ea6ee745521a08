use anyhow::{Context, Result};
use relevance::{
    deserialize_corpus_index, deserialize_document_index, serialize_corpus_index, serialize_document_index,
    CorpusIndex, DocumentIndex,
};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn corpus(&self) -> PathBuf { self.root.join("corpus.json") }
    fn documents(&self) -> PathBuf { self.root.join("documents.jsonl") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_corpus(paths: &IndexPaths, corpus: &CorpusIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.corpus())?;
    let bytes = serialize_corpus_index(corpus)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_corpus(paths: &IndexPaths) -> Result<CorpusIndex> {
    let path = paths.corpus();
    let mut f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let corpus = deserialize_corpus_index(&buf).with_context(|| format!("reading {}", path.display()))?;
    Ok(corpus)
}

/// One serialized document index per line, in indexing order.
pub fn save_documents(paths: &IndexPaths, docs: &[DocumentIndex<String>]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut w = BufWriter::new(File::create(paths.documents())?);
    for doc in docs {
        w.write_all(&serialize_document_index(doc)?)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn load_documents(paths: &IndexPaths) -> Result<Vec<DocumentIndex<String>>> {
    let path = paths.documents();
    let f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut docs = Vec::new();
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc = deserialize_document_index(line.as_bytes())
            .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Everything needed to rank: the corpus statistics and every document index.
pub fn load_index(paths: &IndexPaths) -> Result<(CorpusIndex, Vec<DocumentIndex<String>>)> {
    let corpus = load_corpus(paths)?;
    let docs = load_documents(paths)?;
    if let Ok(meta) = load_meta(paths) {
        if meta.num_docs as usize != docs.len() {
            tracing::warn!(expected = meta.num_docs, found = docs.len(), "document count differs from meta.json");
        }
    }
    Ok((corpus, docs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relevance::{add_document, StemmingTokenizer};
    use tempfile::tempdir;

    #[test]
    fn index_directory_round_trips() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path().join("idx"));

        let mut corpus = CorpusIndex::new();
        let docs = vec![
            add_document(&mut corpus, "Rust is great. rust systems programming.", "doc0".to_string(), &StemmingTokenizer).unwrap(),
            add_document(&mut corpus, "Learning rust.", "doc1".to_string(), &StemmingTokenizer).unwrap(),
        ];
        save_corpus(&paths, &corpus).unwrap();
        save_documents(&paths, &docs).unwrap();
        save_meta(&paths, &MetaFile { num_docs: 2, created_at: "2024-01-01T00:00:00Z".into(), version: 1 }).unwrap();

        let (corpus2, docs2) = load_index(&paths).unwrap();
        assert_eq!(corpus2, corpus);
        assert_eq!(docs2, docs);
        assert_eq!(load_meta(&paths).unwrap().num_docs, 2);
    }

    #[test]
    fn corrupt_document_line_reports_location() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        save_documents(&paths, &[]).unwrap();
        std::fs::write(dir.path().join("documents.jsonl"), "{\"algorithm\":\"Okapi BM25+\"\n").unwrap();
        let err = load_documents(&paths).unwrap_err();
        assert!(err.to_string().ends_with("documents.jsonl:1"), "{err}");
    }
}
