//! End-to-end tests: scripted extraction through merge and store load.

use std::collections::VecDeque;
use std::sync::Mutex;

use loregraph::catalog::{demon_slayer, EntityCatalog};
use loregraph::episodes::Episode;
use loregraph::extract::ChunkExtractor;
use loregraph::graph::{Graph, Node, Properties, PropertyValue, Relationship};
use loregraph::pipeline::Pipeline;
use loregraph::store::loader;
use loregraph::store::memory::MemoryStore;
use loregraph::Result;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extractor returning a pre-scripted response per call.
struct ScriptedExtractor {
    responses: Mutex<VecDeque<Result<Graph>>>,
}

impl ScriptedExtractor {
    fn new(responses: Vec<Result<Graph>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

impl ChunkExtractor for ScriptedExtractor {
    async fn extract(&self, _text: &str, _catalog: &EntityCatalog) -> Result<Graph> {
        self.responses
            .lock()
            .expect("script mutex")
            .pop_front()
            .expect("unexpected extraction call")
    }
}

fn episode(season: u32, number: u32, synopsis: &str) -> Episode {
    Episode {
        season,
        episode_in_season: number,
        synopsis: Some(synopsis.to_string()),
    }
}

fn named_node(id: &str, label: &str, name: &str) -> Node {
    let mut props = Properties::new();
    props.insert("name".to_string(), PropertyValue::Text(name.to_string()));
    Node {
        id: id.to_string(),
        label: label.to_string(),
        properties: Some(props),
    }
}

fn fights(start: &str, end: &str) -> Relationship {
    Relationship {
        rel_type: "FIGHTS".to_string(),
        start_node_id: start.to_string(),
        end_node_id: end.to_string(),
        properties: None,
    }
}

fn fights_partial() -> Graph {
    Graph {
        nodes: vec![
            named_node("N0", "person", "Tanjiro Kamado"),
            named_node("N13", "demon", "Muzan Kibutsuji"),
        ],
        relationships: vec![fights("N0", "N13")],
    }
}

// ---------------------------------------------------------------------------
// Pipeline through store
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_single_episode_scenario_materializes_nodes_and_edge() {
    let pipeline = Pipeline::new(
        ScriptedExtractor::new(vec![Ok(fights_partial())]),
        demon_slayer::catalog(),
        demon_slayer::korean_names(),
    );

    let graph = pipeline
        .build_graph(&[episode(1, 1, "Tanjiro confronts Muzan in Asakusa.")])
        .await
        .expect("pipeline run succeeds");

    let store = MemoryStore::new();
    let result = loader::load(&graph, &store).await;
    assert!(result.is_success());

    // Two stored nodes, localized names.
    let nodes = store.nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(
        nodes[0].properties.get("name"),
        Some(&PropertyValue::Text("카마도 탄지로".to_string()))
    );
    assert_eq!(
        nodes[1].properties.get("name"),
        Some(&PropertyValue::Text("키부츠지 무잔".to_string()))
    );

    // One FIGHTS edge stamped with the episode number.
    let edges = store.relationships();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].rel_type, "FIGHTS");
    assert_eq!(edges[0].start_node_id, "N0");
    assert_eq!(edges[0].end_node_id, "N13");
    assert_eq!(
        edges[0].properties.get("episode_number"),
        Some(&PropertyValue::Text("S1E01".to_string()))
    );
}

#[tokio::test]
async fn test_recurring_fight_across_episodes_keeps_both_edges() {
    let pipeline = Pipeline::new(
        ScriptedExtractor::new(vec![Ok(fights_partial()), Ok(fights_partial())]),
        demon_slayer::catalog(),
        demon_slayer::korean_names(),
    );

    let graph = pipeline
        .build_graph(&[
            episode(1, 1, "First clash."),
            episode(1, 2, "They clash again."),
        ])
        .await
        .expect("pipeline run succeeds");

    // Identical, uniformly localized nodes collapse; relationships never do.
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.relationships.len(), 2);

    let store = MemoryStore::new();
    let result = loader::load(&graph, &store).await;
    assert!(result.is_success());
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.relationship_count(), 2);

    let stamps: Vec<_> = store
        .relationships()
        .iter()
        .map(|r| r.properties.get("episode_number").cloned())
        .collect();
    assert_eq!(
        stamps,
        vec![
            Some(PropertyValue::Text("S1E01".to_string())),
            Some(PropertyValue::Text("S1E02".to_string())),
        ]
    );
}

// ---------------------------------------------------------------------------
// Load semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_write_then_reload_yields_submitted_shape() {
    let graph = fights_partial();
    let store = MemoryStore::new();

    let result = loader::load(&graph, &store).await;
    assert!(result.is_success());
    assert_eq!(store.node_count(), graph.nodes.len());
    assert_eq!(store.relationship_count(), graph.relationships.len());
}

#[tokio::test]
async fn test_double_load_without_wipe_doubles_edges_only() {
    let graph = fights_partial();
    let store = MemoryStore::new();

    loader::load(&graph, &store).await;

    // Replay the write steps without the wipe: upserts collapse, creates
    // do not.
    use loregraph::store::GraphStore;
    store.upsert_nodes(&graph.nodes).await.expect("upsert");
    store
        .create_relationships(&graph.relationships)
        .await
        .expect("create");

    assert_eq!(store.node_count(), 2);
    assert_eq!(store.relationship_count(), 2);
}

#[tokio::test]
async fn test_dangling_relationship_is_dropped_without_aborting() {
    let mut graph = fights_partial();
    graph.relationships.push(fights("N0", "N99"));

    let store = MemoryStore::new();
    let result = loader::load(&graph, &store).await;

    assert!(result.is_success());
    // Counts describe what was submitted, not what attached.
    assert_eq!(result.relationship_count, 2);
    assert_eq!(store.relationship_count(), 1);
}
