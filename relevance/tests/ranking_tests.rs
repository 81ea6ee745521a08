use relevance::filter::retain;
use relevance::scorer::{B, K1, RELEVANCE_FLOOR};
use relevance::{
    add_document, find_relevant_documents, find_relevant_for_phrase, index_document, CorpusIndex, DocumentIndex, Error,
    Scorer, StemmingTokenizer, Tokenizer,
};
use std::collections::HashSet;

const ARTICLES: &[(&str, &str)] = &[
    (
        "sourdough",
        "Sourdough bread relies on a wild yeast starter instead of commercial yeast. \
         Bakers feed the starter with flour and water every day, and the long fermentation \
         gives the loaf its sour flavour, open crumb and crackling crust. A hot Dutch oven \
         traps steam during the first half of baking.",
    ),
    (
        "tides",
        "Ocean tides are driven mostly by the gravitational pull of the Moon, with a smaller \
         contribution from the Sun. When the Sun and Moon line up, spring tides bring unusually \
         high and low water; when they sit at right angles, neap tides are gentler. Coastal \
         geography can amplify the tidal range enormously.",
    ),
    (
        "compilers",
        "A compiler translates source code into machine instructions in several passes. \
         The parser builds a syntax tree, semantic analysis checks types, and the optimizer \
         rewrites an intermediate representation before the backend allocates registers and \
         emits assembly for the target processor.",
    ),
    (
        "beekeeping",
        "Honey bees live in colonies ruled by a single queen who lays thousands of eggs. \
         Worker bees forage for nectar and pollen, build wax comb and guard the hive entrance. \
         Beekeepers inspect frames in spring, watch for swarming and harvest surplus honey \
         late in summer.",
    ),
    (
        "chess",
        "Chess openings such as the Sicilian Defence and the Queen's Gambit shape the middlegame. \
         Players fight for control of the centre squares, develop knights and bishops quickly and \
         castle early to protect the king before launching an attack.",
    ),
    (
        "volcanoes",
        "Volcanoes form where magma rises through cracks in the crust. Shield volcanoes erupt \
         runny basalt lava in gentle flows, while stratovolcanoes build steep cones from layers \
         of ash and sticky lava and can explode violently, hurling pyroclastic clouds down their slopes.",
    ),
];

fn build(texts: &[(&'static str, &str)]) -> (CorpusIndex, Vec<DocumentIndex<&'static str>>) {
    let mut corpus = CorpusIndex::new();
    let docs = texts
        .iter()
        .map(|(id, text)| add_document(&mut corpus, text, *id, &StemmingTokenizer).unwrap())
        .collect();
    (corpus, docs)
}

fn filtered_terms(text: &str) -> HashSet<String> {
    StemmingTokenizer
        .tokenize(text)
        .unwrap()
        .into_iter()
        .filter(retain)
        .map(|t| t.lemma)
        .collect()
}

#[test]
fn document_frequency_counts_documents_not_occurrences() {
    let texts = [
        ("a", "dogs dogs dogs chase cats"),
        ("b", "a dog sleeps"),
        ("c", "cats ignore everything"),
        ("d", ""),
    ];
    let (corpus, docs) = build(&texts);

    let sets: Vec<HashSet<String>> = texts.iter().map(|(_, t)| filtered_terms(t)).collect();
    let all: HashSet<&String> = sets.iter().flatten().collect();
    for term in all {
        let expected = sets.iter().filter(|s| s.contains(term)).count() as u32;
        assert_eq!(corpus.document_frequency(term), expected, "term {term}");
    }
    assert_eq!(corpus.document_frequency("dog"), 2);
    assert_eq!(corpus.terms().count(), filtered_terms("dogs chase cats dog sleeps ignore everything").len());

    assert_eq!(corpus.documents_number(), 4);
    let total: u64 = docs.iter().map(|d| u64::from(d.words_number())).sum();
    assert_eq!(corpus.words_in_all_documents(), total);
    assert_eq!(docs[0].term_frequency("dog"), 3);
    assert_eq!(docs[0].words_number(), 5);
    assert!(docs[3].is_empty());
}

#[test]
fn idf_does_not_increase_with_document_frequency() {
    // term k appears in the first k documents
    let texts: Vec<(&'static str, String)> = (1..=12)
        .map(|i| {
            let words: Vec<String> = (i..=12).map(|k| format!("term{k}x")).collect();
            ("doc", words.join(" "))
        })
        .collect();
    let mut corpus = CorpusIndex::new();
    for (id, text) in &texts {
        add_document(&mut corpus, text, *id, &StemmingTokenizer).unwrap();
    }
    let scorer = Scorer::new(&corpus).unwrap();

    let mut previous = scorer.idf("never-seen");
    for k in 1..=12 {
        let term = format!("term{k}x");
        assert_eq!(corpus.document_frequency(&term), k);
        let idf = scorer.idf(&term);
        assert!(idf <= previous, "idf rose from {previous} to {idf} at df={k}");
        assert!(idf == 0.0 || idf >= 1.0);
        previous = idf;
    }
}

#[test]
fn results_respect_the_relevance_floor() {
    let (corpus, docs) = build(ARTICLES);
    for phrase in ["honey bees", "lava magma crust", "yeast", "queen", "the", "tides moon"] {
        let hits = find_relevant_for_phrase(phrase, 10, &corpus, &docs, &StemmingTokenizer).unwrap();
        assert!(hits.iter().all(|(_, s)| s.total > RELEVANCE_FLOOR), "{phrase}");
        assert!(hits.windows(2).all(|w| w[0].1.total >= w[1].1.total), "{phrase}");
    }
    for (_, text) in ARTICLES {
        let hits = find_relevant_documents(text, 10, &corpus, &docs, &StemmingTokenizer).unwrap();
        assert!(hits.iter().all(|(_, s)| s.total > RELEVANCE_FLOOR));
    }
}

#[test]
fn phrase_finds_the_topical_document() {
    let (corpus, docs) = build(ARTICLES);
    let hits = find_relevant_for_phrase("volcanic lava eruptions", 3, &corpus, &docs, &StemmingTokenizer).unwrap();
    assert_eq!(*hits[0].0, "volcanoes");

    let hits = find_relevant_for_phrase("beekeepers harvest honey", 3, &corpus, &docs, &StemmingTokenizer).unwrap();
    assert_eq!(*hits[0].0, "beekeeping");
    let score = &hits[0].1;
    let sum: f64 = score.per_word.values().sum();
    assert!((sum - score.total).abs() < 1e-9);
    assert!(score.per_word.contains_key("honey"));
}

#[test]
fn every_document_retrieves_itself_first() {
    let (corpus, docs) = build(ARTICLES);
    for (id, text) in ARTICLES {
        let hits = find_relevant_documents(text, 3, &corpus, &docs, &StemmingTokenizer).unwrap();
        assert!(!hits.is_empty(), "{id} found nothing");
        assert_eq!(hits[0].0, id, "{id} did not rank itself first");
        assert!(hits.len() <= 3);
    }
}

#[test]
fn query_text_is_not_folded_into_the_corpus() {
    let (corpus, docs) = build(ARTICLES);
    let before = corpus.clone();
    find_relevant_documents("a brand new text about glaciers", 5, &corpus, &docs, &StemmingTokenizer).unwrap();
    assert_eq!(corpus, before);
}

#[test]
fn two_documents_sharing_a_term_score_by_formula() {
    let (corpus, docs) = build(&[("d1", "cats and dogs"), ("d2", "dogs and birds")]);
    let scorer = Scorer::new(&corpus).unwrap();
    assert_eq!(docs[1].words_number(), 2);
    assert_eq!(scorer.average_document_length(), 2.0);

    // "dog" is in every document: ln argument 1 + 0.5/2.5 < e, so idf clamps to zero
    let expected = scorer.idf("dog") * scorer.term_weight(1, 2);
    assert_eq!(expected, 0.0);
    let raw = scorer.score_weighted_terms(&[("dog", scorer.idf("dog"))], &docs[1]);
    assert_eq!(raw.total, expected);
    let phrase = index_document("dogs", (), &StemmingTokenizer).unwrap();
    assert!(scorer.phrase_weights(&phrase).is_empty());

    let hits = find_relevant_for_phrase("dogs", 10, &corpus, &docs, &StemmingTokenizer).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn shared_term_ranks_both_documents_in_a_larger_corpus() {
    let mut texts = vec![("d1", "cats and dogs"), ("d2", "dogs and birds")];
    texts.extend([
        ("x1", "red apples"),
        ("x2", "green pears"),
        ("x3", "blue plums"),
        ("x4", "ripe figs"),
        ("x5", "sour lemons"),
        ("x6", "sweet grapes"),
        ("x7", "dried dates"),
        ("x8", "fresh cherries"),
    ]);
    let (corpus, docs) = build(&texts);
    let scorer = Scorer::new(&corpus).unwrap();

    let hits = find_relevant_for_phrase("dogs", 10, &corpus, &docs, &StemmingTokenizer).unwrap();
    let ids: Vec<&str> = hits.iter().map(|(id, _)| **id).collect();
    assert_eq!(ids, vec!["d1", "d2"]);

    let expected = (1.0f64 + 8.5 / 2.5).ln() * (1.0 * (K1 + 1.0) / (1.0 + K1 * (1.0 - B + B * 2.0 / 2.0)));
    assert!((scorer.idf("dog") * scorer.term_weight(1, 2) - expected).abs() < 1e-12);
    assert!(hits[1].1.total >= expected - 1e-12);
    assert!(hits[0].1.total >= hits[1].1.total);
}

#[test]
fn scoring_an_empty_corpus_fails() {
    let corpus = CorpusIndex::new();
    let docs: Vec<DocumentIndex<&str>> = Vec::new();
    assert!(matches!(Scorer::new(&corpus), Err(Error::EmptyCorpus)));
    assert!(matches!(
        find_relevant_for_phrase("anything", 10, &corpus, &docs, &StemmingTokenizer),
        Err(Error::EmptyCorpus)
    ));
    assert!(matches!(
        find_relevant_documents("anything", 10, &corpus, &docs, &StemmingTokenizer),
        Err(Error::EmptyCorpus)
    ));
}

#[test]
fn candidate_subset_limits_results() {
    let (corpus, docs) = build(ARTICLES);
    let subset: Vec<&DocumentIndex<&str>> = docs.iter().filter(|d| *d.doc_id() != "beekeeping").collect();
    let hits = find_relevant_for_phrase("honey bees hive", 10, &corpus, subset, &StemmingTokenizer).unwrap();
    assert!(hits.iter().all(|(id, _)| **id != "beekeeping"));
}
