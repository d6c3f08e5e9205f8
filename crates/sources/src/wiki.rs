//! Wikipedia and curated-knowledge source connector.
//!
//! Works without API keys: queries the Wikipedia opensearch/extracts APIs
//! and falls back to a curated set of quantum articles when the network
//! path fails, so the pipeline always has something to index.

use quanta_core::{AppError, AppResult, SearchHit};
use std::time::Duration;

/// Wikipedia API endpoint.
const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Per-request HTTP timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum article titles fetched per query.
const MAX_TITLES: usize = 3;

/// Extract length cap in characters.
const EXTRACT_CAP: usize = 600;

const USER_AGENT: &str = "Quanta/1.0 (Educational Research)";

/// Keyless web connector: Wikipedia plus curated quantum references.
pub struct WikiSearcher {
    client: reqwest::Client,
}

impl WikiSearcher {
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Source(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Search all keyless sources: curated facts, Wikipedia, and study
    /// references, in that order.
    pub async fn search_all(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        let mut hits = quantum_facts(query);
        hits.extend(self.search_wikipedia(query).await);
        hits.extend(quantum_study_references(query));

        tracing::debug!("Keyless sources returned {} results", hits.len());
        Ok(hits)
    }

    /// Curated results only, without touching the network.
    pub fn search_curated(&self, query: &str) -> Vec<SearchHit> {
        let mut hits = quantum_facts(query);
        hits.extend(curated_articles(query));
        hits.extend(quantum_study_references(query));
        hits
    }

    /// Search Wikipedia and fetch intro extracts for the top titles.
    ///
    /// Network failures degrade to the curated article set instead of
    /// propagating; this connector is the always-available fallback.
    pub async fn search_wikipedia(&self, query: &str) -> Vec<SearchHit> {
        match self.search_wikipedia_inner(query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!("Wikipedia search failed, using curated articles: {}", e);
                curated_articles(query)
            }
        }
    }

    async fn search_wikipedia_inner(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        let clean_query = query.replace(['?', '!'], " ").trim().to_string();

        let response = self
            .client
            .get(WIKIPEDIA_API_URL)
            .query(&[
                ("action", "opensearch"),
                ("search", clean_query.as_str()),
                ("limit", &MAX_TITLES.to_string()),
                ("format", "json"),
                ("namespace", "0"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Wikipedia request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Source(format!(
                "Wikipedia API error ({})",
                response.status()
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse Wikipedia response: {}", e)))?;

        // Opensearch payload: [query, [titles], [descriptions], [links]]
        let titles = data.get(1).and_then(|v| v.as_array());
        let links = data.get(3).and_then(|v| v.as_array());

        let (Some(titles), Some(links)) = (titles, links) else {
            return Err(AppError::Source(
                "Unexpected Wikipedia opensearch payload shape".to_string(),
            ));
        };

        let mut hits = Vec::new();
        for (title, link) in titles.iter().zip(links.iter()) {
            let (Some(title), Some(link)) = (title.as_str(), link.as_str()) else {
                continue;
            };
            if title.is_empty() || link.is_empty() {
                continue;
            }

            let extract = self.get_extract(title).await;
            hits.push(SearchHit::new(title, extract, link, "Wikipedia"));
        }

        Ok(hits)
    }

    /// Get the intro extract of a Wikipedia article, capped to 600 chars.
    async fn get_extract(&self, title: &str) -> String {
        match self.get_extract_inner(title).await {
            Ok(Some(extract)) => extract,
            Ok(None) | Err(_) => format!("Wikipedia article about {}", title),
        }
    }

    async fn get_extract_inner(&self, title: &str) -> AppResult<Option<String>> {
        let response = self
            .client
            .get(WIKIPEDIA_API_URL)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("titles", title),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Source(format!("Wikipedia extract request failed: {}", e)))?;

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Source(format!("Failed to parse extract response: {}", e)))?;

        let pages = data
            .get("query")
            .and_then(|q| q.get("pages"))
            .and_then(|p| p.as_object());

        let Some(pages) = pages else {
            return Ok(None);
        };

        for page in pages.values() {
            if let Some(extract) = page.get("extract").and_then(|e| e.as_str()) {
                if !extract.is_empty() {
                    return Ok(Some(cap_extract(extract)));
                }
            }
        }

        Ok(None)
    }
}

/// Truncate an extract to the cap, appending an ellipsis when shortened.
fn cap_extract(extract: &str) -> String {
    let mut chars = extract.char_indices();
    match chars.nth(EXTRACT_CAP) {
        Some((idx, _)) => format!("{}...", &extract[..idx]),
        None => extract.to_string(),
    }
}

/// Curated Wikipedia articles served when the network path fails.
fn curated_articles(query: &str) -> Vec<SearchHit> {
    let query_lower = query.to_lowercase();
    let mut articles = Vec::new();

    if query_lower.contains("qubit") {
        articles.push(SearchHit::new(
            "Qubit",
            "In quantum computing, a qubit or quantum bit is a basic unit of quantum \
             information, the quantum version of the classic binary bit physically realized \
             with a two-state device. A qubit is a two-state quantum-mechanical system, one \
             of the simplest quantum systems displaying the peculiarity of quantum mechanics. \
             Examples include the spin of the electron in which the two levels can be taken \
             as spin up and spin down, or the polarization of a single photon in which the \
             two states can be taken to be the vertical polarization and the horizontal \
             polarization. In a classical system, a bit would have to be in one state or the \
             other. However, quantum mechanics allows the qubit to be in a coherent \
             superposition of both states simultaneously, a property that is fundamental to \
             quantum mechanics and quantum computing.",
            "https://en.wikipedia.org/wiki/Qubit",
            "Wikipedia",
        ));
    }

    if query_lower.contains("entangle") {
        articles.push(SearchHit::new(
            "Quantum entanglement",
            "Quantum entanglement is a phenomenon in quantum mechanics in which the quantum \
             states of two or more objects are correlated, meaning the state of one object \
             cannot be fully described without considering the others, even if the objects \
             are spatially separated. This leads to correlations between observable physical \
             properties. For example, it is possible to prepare two particles in a single \
             quantum state such that when one is observed to be spin-up, the other one will \
             always be observed to be spin-down and vice versa. The phenomenon is \
             counter-intuitive because it seems to contradict the principle of locality. \
             Albert Einstein famously derided entanglement as \"spooky action at a distance.\"",
            "https://en.wikipedia.org/wiki/Quantum_entanglement",
            "Wikipedia",
        ));
    }

    if query_lower.contains("superposition") {
        articles.push(SearchHit::new(
            "Quantum superposition",
            "Quantum superposition is a fundamental principle of quantum mechanics that \
             states that linear combinations of solutions to the Schrödinger equation are \
             also solutions. In the quantum realm, particles can exist in multiple states \
             simultaneously. This means a quantum system can be in a state that is a \
             combination of multiple possible states until it is measured. For example, an \
             electron in an atom can exist in a superposition of different energy levels. \
             The famous Schrödinger's cat thought experiment illustrates this concept. \
             Superposition is what allows quantum computers to process vast amounts of \
             information in parallel.",
            "https://en.wikipedia.org/wiki/Quantum_superposition",
            "Wikipedia",
        ));
    }

    articles
}

/// Study references from quantum computing educational sites, matched by
/// topic keywords.
fn quantum_study_references(query: &str) -> Vec<SearchHit> {
    let query_lower = query.to_lowercase();
    let mut hits = Vec::new();

    let general_topics = ["qubit", "gate", "circuit", "algorithm", "quantum"];
    if general_topics.iter().any(|t| query_lower.contains(t)) {
        hits.push(SearchHit::new(
            "IBM Quantum Learning - Quantum Computing Basics",
            "A qubit is a quantum bit, the counterpart in quantum computing to the binary \
             digit or bit of classical computing. Just as a bit is the basic unit of \
             information in a classical computer, a qubit is the basic unit of information \
             in a quantum computer. Qubits can exist in a superposition of states, which \
             means they can be in multiple states at once. This is different from classical \
             bits which can only be in one state (0 or 1) at a time. When measured, a qubit \
             will collapse to either 0 or 1, but before measurement it exists in a \
             probabilistic combination of both. This quantum property, along with \
             entanglement, enables quantum computers to process information in fundamentally \
             new ways.",
            "https://learning.quantum.ibm.com/",
            "IBM Quantum",
        ));
    }

    if query_lower.contains("entangle") {
        hits.push(SearchHit::new(
            "IBM Quantum - Understanding Entanglement",
            "Quantum entanglement is one of the most fascinating and counterintuitive \
             phenomena in quantum mechanics. When two qubits become entangled, their quantum \
             states become correlated in such a way that measuring one qubit instantly \
             affects the state of the other, regardless of the distance between them. This \
             \"spooky action at a distance,\" as Einstein called it, is not due to any \
             physical connection between the qubits, but rather a fundamental property of \
             quantum mechanics. Entanglement is a crucial resource for quantum computing, \
             enabling quantum algorithms to perform operations that would be impossible with \
             classical bits. It's also essential for quantum communication protocols like \
             quantum teleportation and quantum cryptography.",
            "https://learning.quantum.ibm.com/course/basics-of-quantum-information/entanglement-in-action",
            "IBM Quantum",
        ));
    }

    if query_lower.contains("qubit") || query_lower.contains("algorithm") {
        hits.push(SearchHit::new(
            "Qiskit Textbook - Understanding Quantum Information",
            "The Qiskit Textbook provides a comprehensive introduction to quantum computing. \
             A qubit, or quantum bit, is represented mathematically as a vector in a \
             two-dimensional complex vector space. The two computational basis states are \
             usually denoted as |0⟩ and |1⟩. Any qubit state can be written as a linear \
             combination (superposition) of these basis states: |ψ⟩ = α|0⟩ + β|1⟩, where α \
             and β are complex numbers satisfying |α|² + |β|² = 1. The coefficients α and β \
             represent probability amplitudes. When we measure the qubit, we get outcome 0 \
             with probability |α|² and outcome 1 with probability |β|². This probabilistic \
             nature is a key feature of quantum mechanics.",
            "https://qiskit.org/learn/",
            "Qiskit",
        ));
    }

    hits
}

/// Curated quantum facts, always available offline.
fn quantum_facts(query: &str) -> Vec<SearchHit> {
    let query_lower = query.to_lowercase();
    let mut hits = Vec::new();

    if query_lower.contains("qubit") {
        hits.push(qubit_fact());
    }

    if query_lower.contains("entangle") {
        hits.push(SearchHit::new(
            "Quantum Entanglement Explained",
            "Quantum entanglement is a physical phenomenon that occurs when pairs or groups \
             of particles interact in ways such that the quantum state of each particle \
             cannot be described independently. Instead, a quantum state must be described \
             for the system as a whole. When particles are entangled, measurement of one \
             particle's properties will instantly affect the properties of the other \
             particles, regardless of the distance separating them. This was famously \
             described by Einstein as \"spooky action at a distance.\" For example, if two \
             electrons are entangled with opposite spins, measuring one electron as spin-up \
             will instantaneously cause the other to be spin-down. Entanglement is not \
             caused by any physical connection or signal between particles; it's a \
             fundamental feature of quantum mechanics. It enables quantum teleportation, \
             quantum cryptography, and provides computational advantages in quantum \
             algorithms.",
            "https://en.wikipedia.org/wiki/Quantum_entanglement",
            "Quantum Knowledge Base",
        ));
    }

    // Generic quantum queries still get the qubit primer
    if hits.is_empty() && query_lower.contains("quantum") {
        hits.push(qubit_fact());
    }

    hits
}

fn qubit_fact() -> SearchHit {
    SearchHit::new(
        "What is a Qubit? - Quantum Computing Fundamentals",
        "A qubit (quantum bit) is the fundamental unit of quantum information and the \
         quantum analog of the classical binary bit. Unlike classical bits that must be \
         either 0 or 1, qubits can exist in a quantum superposition of both states \
         simultaneously. This is mathematically represented as |ψ⟩ = α|0⟩ + β|1⟩, where α \
         and β are complex probability amplitudes. When measured, a qubit collapses to \
         either 0 (with probability |α|²) or 1 (with probability |β|²). Physically, qubits \
         can be implemented using various quantum systems: electron spin (spin-up or \
         spin-down), photon polarization (horizontal or vertical), superconducting circuits \
         (current flowing clockwise or counterclockwise), or trapped ions (different energy \
         levels). The power of quantum computing comes from three key qubit properties: \
         superposition (being in multiple states at once), entanglement (correlations \
         between qubits that have no classical equivalent), and interference (probability \
         amplitudes combining constructively or destructively).",
        "https://en.wikipedia.org/wiki/Qubit",
        "Quantum Knowledge Base",
    )
}
