use crate::models::{ClusterResponse, RecommendedPlayer, Scalar};

/// Markup for either shape of a clustering reply
pub fn render_response(response: &ClusterResponse) -> String {
    match response {
        ClusterResponse::Error(message) => render_error(message),
        ClusterResponse::Clustered {
            cluster,
            recommended_players,
        } => render_cluster(cluster, recommended_players),
    }
}

/// Markup for a failed submission, shown in place of recommendations
pub fn render_error(message: &str) -> String {
    format!(
        r#"<p style="color:red;">Error: {}</p>"#,
        escape_html(message)
    )
}

/// Markup for a predicted cluster and its similar players
///
/// Players are listed in the order the server returned them. An empty slice
/// still yields an (empty) `<ul>`.
pub fn render_cluster(cluster: &Scalar, players: &[RecommendedPlayer]) -> String {
    let items: String = players
        .iter()
        .map(|p| format!("<li>{}</li>", escape_html(&player_line(p))))
        .collect();

    format!(
        "<p><strong>Predicted Cluster:</strong> {}</p><p>Similar Players:</p><ul>{}</ul>",
        escape_html(&cluster.to_string()),
        items
    )
}

/// `<id> - Level: <level>, Rank: <rank>, Budget: $<budget>`
pub fn player_line(player: &RecommendedPlayer) -> String {
    format!(
        "{} - Level: {}, Rank: {}, Budget: ${}",
        player.id, player.level, player.rank, player.max_budget_per_session
    )
}

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
