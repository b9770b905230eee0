fn main() {
    println!("Run `cargo test -p api-compat` to execute API compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use gameshelf_api::{FormFields, GameId, GameRecord, NewGame};

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    fn parse_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        serde_json::from_value(load_fixture(name))
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"))
    }

    /// Deserializes a fixture, re-serializes it and compares the JSON values.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  server: {fixture}\n  client: {reserialized}"
        );
    }

    #[test]
    fn fixture_games_list_plain() {
        roundtrip_test::<Vec<GameRecord>>("games_list_plain.json");
    }

    #[test]
    fn fixture_games_list_mongo() {
        let games: Vec<GameRecord> = parse_fixture("games_list_mongo.json");
        assert_eq!(games.len(), 3);

        assert_eq!(games[0].id, GameId::new("65f1c0a2b3d4e5f601234567"));
        assert_eq!(games[0].explicit_image(), Some("https://img.example/halo.jpg"));

        // Blank and missing image URLs both mean "no explicit image".
        assert_eq!(games[1].image_url, None);
        assert_eq!(games[2].image_url, None);
        assert_eq!(games[2].platform, "PC");
    }

    #[test]
    fn fixture_mongo_ids_serialize_as_plain_strings() {
        let games: Vec<GameRecord> = parse_fixture("games_list_mongo.json");
        let value = serde_json::to_value(&games[0]).unwrap();
        assert_eq!(value["id"], "65f1c0a2b3d4e5f601234567");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn fixture_search_empty() {
        let games: Vec<GameRecord> = parse_fixture("search_empty.json");
        assert!(games.is_empty());
    }

    #[test]
    fn fixture_new_game_body() {
        let body = NewGame::new("Celeste", "PC").with_image_url(Some("  ".into()));
        assert_eq!(serde_json::to_value(&body).unwrap(), load_fixture("new_game.json"));
    }

    #[test]
    fn fixture_edit_form() {
        roundtrip_test::<FormFields>("edit_form.json");
    }
}
