use anyhow::Result;
use clap::{Parser, Subcommand};
use relmap::store::Document;
use relmap::{Config, Edge, Node, NodeKind, Session};

#[derive(Parser, Debug)]
#[command(name = "relmap")]
#[command(about = "Relationship graph: add people and relations, search, filter")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a node (person/org/place/concept)
    AddNode {
        #[arg(long)]
        name: String,
        /// person, org, place, or concept
        #[arg(long, default_value = "person")]
        r#type: String,
        /// Comma-separated alternate names
        #[arg(long, default_value = "")]
        aliases: String,
        /// Comma-separated labels
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Edit an existing node (full replacement, position preserved)
    EditNode {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "person")]
        r#type: String,
        #[arg(long, default_value = "")]
        aliases: String,
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Add a relation between two existing nodes
    AddEdge {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        #[arg(long, default_value = "related")]
        r#type: String,
        /// Symmetric relation (the default is one-way)
        #[arg(long)]
        undirected: bool,
        #[arg(long, default_value_t = 0.5)]
        weight: f64,
        #[arg(long, default_value = "")]
        evidence: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Search by name or alias and show the hit with its relations
    Search {
        query: String,
        /// Comma-separated relation types to keep (empty = all)
        #[arg(long, default_value = "")]
        types: String,
    },
    /// List the relations touching a node
    Neighbors {
        id: String,
        #[arg(long, default_value = "")]
        types: String,
    },
    /// List distinct relation types (filter choices)
    Types,
    /// Summarize the renderable graph for the current filter/search
    Show {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "")]
        types: String,
    },
    /// Replace the store with an external JSON document
    Import { file: std::path::PathBuf },
    /// Print the current document as JSON (optionally to a file)
    Export { file: Option<std::path::PathBuf> },
}

/// Split a comma-separated form field the way the original inputs did:
/// trim each entry, drop empties.
fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_edge_line(session: &Session, edge: &Edge) {
    let name_of = |id: &str| {
        session
            .document()
            .get_node(id)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let arrow = if edge.directional { "->" } else { "--" };
    println!(
        "- {} : {} {} {} (weight {:.2})",
        edge.relation_type,
        name_of(&edge.source_id),
        arrow,
        name_of(&edge.target_id),
        edge.weight
    );
    if !edge.evidence.is_empty() {
        println!("    evidence: {}", edge.evidence);
    }
    if !edge.note.is_empty() {
        println!("    note: {}", edge.note);
    }
}

fn print_node_detail(node: &Node) {
    println!("{} ({})", node.name, node.id);
    println!("type: {}", node.kind.as_str());
    if !node.aliases.is_empty() {
        println!("aliases: {}", node.aliases.join(", "));
    }
    if !node.tags.is_empty() {
        println!("tags: {}", node.tags.join(", "));
    }
    if !node.notes.is_empty() {
        println!("{}", node.notes);
    }
}

fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info"),
    )
    .init();

    let args = Args::parse();

    let config = Config::load()?;
    let mut session =
        Session::open_with_project(config.data_path(), &config.relmap.default_project)?;

    match args.command {
        Command::AddNode {
            name,
            r#type,
            aliases,
            tags,
            notes,
        } => {
            let node = Node {
                id: Document::new_node_id(),
                name,
                aliases: split_csv(&aliases),
                kind: r#type.parse::<NodeKind>()?,
                tags: split_csv(&tags),
                notes: notes.trim().to_string(),
            };
            let id = node.id.clone();
            session.save_node(node)?;
            println!("Added node {}", id);
        }
        Command::EditNode {
            id,
            name,
            r#type,
            aliases,
            tags,
            notes,
        } => {
            if session.document().get_node(&id).is_none() {
                anyhow::bail!("No node with id {}", id);
            }
            let node = Node {
                id: id.clone(),
                name,
                aliases: split_csv(&aliases),
                kind: r#type.parse::<NodeKind>()?,
                tags: split_csv(&tags),
                notes: notes.trim().to_string(),
            };
            session.save_node(node)?;
            println!("Updated node {}", id);
        }
        Command::AddEdge {
            source,
            target,
            r#type,
            undirected,
            weight,
            evidence,
            note,
        } => {
            let edge = Edge {
                id: Document::new_edge_id(),
                source_id: source,
                target_id: target,
                relation_type: r#type,
                directional: !undirected,
                weight,
                evidence,
                note,
            };
            let id = edge.id.clone();
            session.save_edge(edge)?;
            println!("Added edge {}", id);
        }
        Command::Search { query, types } => {
            session.set_search(&query);
            session.set_filter(split_csv(&types));
            let view = session.view()?;
            match view.highlight.as_deref().and_then(|id| session.document().get_node(id)) {
                Some(node) => {
                    print_node_detail(node);
                    if !view.detail_edges.is_empty() {
                        println!("\nRelations:");
                        for edge in &view.detail_edges {
                            print_edge_line(&session, edge);
                        }
                    }
                }
                None => println!("No match."),
            }
        }
        Command::Neighbors { id, types } => {
            if session.document().get_node(&id).is_none() {
                anyhow::bail!("No node with id {}", id);
            }
            let allowed: std::collections::BTreeSet<String> =
                split_csv(&types).into_iter().collect();
            let allowed = if allowed.is_empty() { None } else { Some(&allowed) };
            let edges: Vec<Edge> =
                relmap::query::edges_for_node(session.document(), &id, allowed)
                    .into_iter()
                    .cloned()
                    .collect();
            if edges.is_empty() {
                println!("No relations.");
            }
            for edge in &edges {
                print_edge_line(&session, edge);
            }
        }
        Command::Types => {
            for t in session.relation_types() {
                println!("{}", t);
            }
        }
        Command::Show { search, types } => {
            session.set_search(&search);
            session.set_filter(split_csv(&types));
            let view = session.view()?;
            println!(
                "Project: {}",
                session.document().meta.project
            );
            println!(
                "{} nodes, {} renderable relations",
                view.scene.vertices.len(),
                view.scene.arcs.len()
            );
            for v in &view.scene.vertices {
                let mark = if v.highlighted { " *" } else { "" };
                println!("  {} ({}){}", v.label, v.id, mark);
            }
            for a in &view.scene.arcs {
                let arrow = if a.directed { "->" } else { "--" };
                println!("  {} {} {} [{}]", a.source, arrow, a.target, a.label);
            }
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)?;
            session.import(&raw)?;
            println!(
                "Imported {} nodes, {} edges",
                session.document().nodes.len(),
                session.document().edges.len()
            );
        }
        Command::Export { file } => {
            let json = session.export()?;
            match file {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
