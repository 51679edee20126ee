use std::path::Path;

use top_down_shooter::assets::*;
use top_down_shooter::entities::{Facing, TILE_PALETTE};

fn sheet_source(rows: &[&str], width: u32, height: u32) -> String {
    let rows: Vec<String> = rows.iter().map(|r| format!("\"{r}\"")).collect();
    format!("(width: {width}, height: {height}, rows: [{}])", rows.join(", "))
}

#[test]
fn bundled_sheet_parses() {
    let sheet = SpriteSheet::bundled().expect("bundled sheet is valid");
    assert_eq!((sheet.width, sheet.height), (32, 32));
    assert_eq!(sheet.get(31, 31), Some(0));
    assert_eq!(sheet.get(32, 0), None);
    assert_eq!(sheet.get(0, 32), None);
}

#[test]
fn bundled_tiles_are_opaque() {
    let sheet = SpriteSheet::bundled().unwrap();
    for &(u, v) in TILE_PALETTE.iter() {
        for j in 0..8 {
            for i in 0..8 {
                assert_ne!(sheet.get(u + i, v + j), Some(0), "tile ({u},{v}) pixel ({i},{j})");
            }
        }
    }
}

#[test]
fn bundled_sprites_are_not_blank() {
    let sheet = SpriteSheet::bundled().unwrap();
    let facings = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];
    for region in facings
        .iter()
        .flat_map(|&f| [player_region(f), enemy_region(f)])
    {
        let painted = (0..8)
            .flat_map(|j| (0..8).map(move |i| (i, j)))
            .filter(|&(i, j)| sheet.get(region.u + i, region.v + j) != Some(0))
            .count();
        assert!(painted > 0, "{region:?} is blank");
    }
}

#[test]
fn sprite_regions_by_facing() {
    assert_eq!(player_region(Facing::Up), Region::sprite(8, 8));
    assert_eq!(player_region(Facing::Down), Region::sprite(0, 0));
    assert_eq!(player_region(Facing::Left), Region::sprite(8, 0));
    assert_eq!(player_region(Facing::Right), Region::sprite(0, 8));
    assert_eq!(enemy_region(Facing::Up), Region::sprite(8, 24));
    assert_eq!(enemy_region(Facing::Down), Region::sprite(0, 16));
    assert_eq!(enemy_region(Facing::Left), Region::sprite(8, 16));
    assert_eq!(enemy_region(Facing::Right), Region::sprite(0, 24));
}

#[test]
fn parse_reads_hex_pixels() {
    let sheet = SpriteSheet::parse(&sheet_source(&["0f", "A1"], 2, 2)).unwrap();
    assert_eq!(sheet.get(1, 0), Some(15));
    assert_eq!(sheet.get(0, 1), Some(10));
    assert_eq!(sheet.get(1, 1), Some(1));
}

#[test]
fn parse_rejects_wrong_row_count() {
    let err = SpriteSheet::parse(&sheet_source(&["00"], 2, 2)).unwrap_err();
    assert!(matches!(err, AssetError::RowCount { expected: 2, actual: 1 }));
}

#[test]
fn parse_rejects_ragged_rows() {
    let err = SpriteSheet::parse(&sheet_source(&["00", "000"], 2, 2)).unwrap_err();
    assert!(matches!(err, AssetError::RowWidth { row: 1, expected: 2, actual: 3 }));
}

#[test]
fn parse_rejects_non_palette_pixels() {
    let err = SpriteSheet::parse(&sheet_source(&["00", "0g"], 2, 2)).unwrap_err();
    assert!(matches!(err, AssetError::BadPixel { character: 'g', x: 1, y: 1 }));
}

#[test]
fn parse_rejects_empty_sheet() {
    let err = SpriteSheet::parse(&sheet_source(&[], 0, 0)).unwrap_err();
    assert!(matches!(err, AssetError::Dimensions { .. }));
}

#[test]
fn parse_rejects_invalid_ron() {
    let err = SpriteSheet::parse("(width: 2,").unwrap_err();
    assert!(matches!(err, AssetError::Parse(_)));
}

#[test]
fn load_missing_file_is_a_read_error() {
    let err = SpriteSheet::load(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(matches!(err, AssetError::Read { .. }));
    assert!(err.to_string().contains("does/not/exist.ron"));
}
