use paypageapp::commands::block::BlockUpdate;
use paypageapp::content::{self, BlockContent};
use paypageapp::model::{BlockVariant, ColumnPosition, CompositionId, ViewMode};
use paypageapp::render::render;
use paypageapp::session::EditingSession;
use paypageapp::store::fs::FileStore;
use paypageapp::store::CompositionStore;
use paypageapp::style::{resolve_style, FontSize, TextAlign};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    (dir, store)
}

#[test]
fn test_save_and_load_keeps_name_and_block_order() {
    let (_dir, mut store) = setup();

    let mut session = EditingSession::new("Promo");
    let col = session.add_column(ColumnPosition::Top);
    let first = session.add_block(&col, BlockVariant::Text).unwrap();
    let second = session.add_block(&col, BlockVariant::Countdown).unwrap();
    let id = session.save(&mut store).unwrap();
    assert!(!session.has_unsaved_changes());

    let loaded = store.load(&id).unwrap();
    assert_eq!(loaded.name, "Promo");
    let ids: Vec<_> = loaded.blocks().map(|b| b.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(&loaded, session.composition());
}

#[test]
fn test_structured_content_is_stored_as_string() {
    let (dir, mut store) = setup();

    let mut session = EditingSession::new("Promo");
    let col = session.add_column(ColumnPosition::Left);
    let block = session.add_block(&col, BlockVariant::Advantages).unwrap();
    let raw = content::encode(&BlockContent::Advantages(vec!["Frete grátis".into()]));
    session.update_block(&col, &block, &BlockUpdate::content(raw));
    let id = session.save(&mut store).unwrap();

    let on_disk = fs::read_to_string(dir.path().join(format!("checkout-{}.json", id))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    let stored = &value["columns"][0]["components"][0]["content"];
    assert!(stored.is_string());
    assert_eq!(stored.as_str().unwrap(), r#"["Frete grátis"]"#);
}

#[test]
fn test_resave_updates_in_place() {
    let (dir, mut store) = setup();

    let mut session = EditingSession::new("Promo");
    let first_id = session.save(&mut store).unwrap();
    session.rename("Promo 2");
    let second_id = session.save(&mut store).unwrap();

    assert_eq!(first_id, second_id);
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Promo 2");
    let files = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 1);
}

#[test]
fn test_legacy_flat_record_on_disk() {
    let (dir, store) = setup();
    fs::write(
        dir.path().join("checkout-legacy.json"),
        r#"{"id":"legacy","name":"Antiga","components":[
            {"id":"text-1","type":"text","content":"Olá"},
            {"id":"mystery-1","type":"carousel","content":"?"},
            {"id":"social-1","type":"social","content":"not json"}
        ],"created_at":"2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let loaded = store.load(&CompositionId::new("legacy")).unwrap();
    assert_eq!(loaded.columns.len(), 1);
    assert_eq!(loaded.columns[0].position, ColumnPosition::Top);
    let blocks: Vec<_> = loaded.blocks().collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].content, BlockContent::Text("Olá".into()));
    assert_eq!(blocks[1].content, BlockContent::Social(Vec::new()));
}

#[test]
fn test_bad_props_do_not_make_the_record_unloadable() {
    let (dir, store) = setup();
    fs::write(
        dir.path().join("checkout-styled.json"),
        r#"{"id":"styled","name":"Estilos","columns":[{"id":"col-1","position":"top","components":[
            {"id":"text-1","type":"text","content":"Primeiro",
             "props":{"borderWidth":-1,"textAlign":"start","fontSize":"large"}},
            {"id":"text-2","type":"text","content":"Segundo"}
        ]}],"created_at":"2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let loaded = store.load(&CompositionId::new("styled")).unwrap();
    let blocks: Vec<_> = loaded.blocks().collect();
    assert_eq!(blocks.len(), 2);
    let style = resolve_style(blocks[0]);
    assert_eq!(style.border_width, 2);
    assert_eq!(style.text_align, TextAlign::Left);
    assert_eq!(style.font_size, FontSize::Large);
    assert_eq!(blocks[1].content, BlockContent::Text("Segundo".into()));

    let tree = serde_json::to_string(&render(&loaded, ViewMode::Desktop)).unwrap();
    assert!(tree.contains("Primeiro"));
    assert!(tree.contains("Segundo"));
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_delete_removes_file() {
    let (dir, mut store) = setup();
    let id = EditingSession::new("Promo").save(&mut store).unwrap();
    store.delete(&id).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
