//! Static level catalog
//!
//! Three hand-authored levels. The catalog is a pure function of the viewport
//! height: the ground line is anchored to the bottom of the screen and every
//! platform, coin and enemy position hangs off it. Descriptors are immutable;
//! `World::generate_level` turns them into live entities.

use glam::Vec2;

use super::collision::Rect;
use crate::consts::GROUND_MARGIN;

/// Enemy spawn descriptor: position plus patrol speed (pixels/tick)
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub speed: f32,
}

/// One immutable level definition
#[derive(Debug, Clone)]
pub struct LevelDef {
    pub name: &'static str,
    pub platforms: Vec<Rect>,
    pub coins: Vec<Vec2>,
    pub enemies: Vec<EnemySpawn>,
    /// Platform fill color for this level's theme
    pub theme_color: &'static str,
    /// Enemy color for this level
    pub enemy_color: &'static str,
}

fn platform(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x, y, w, h)
}

fn spawn(x: f32, y: f32, speed: f32) -> EnemySpawn {
    EnemySpawn {
        pos: Vec2::new(x, y),
        speed,
    }
}

/// Build the ordered level list for a viewport height
pub fn level_catalog(viewport_h: f32) -> Vec<LevelDef> {
    let g = viewport_h - GROUND_MARGIN;

    vec![
        LevelDef {
            name: "Green Plains",
            platforms: vec![
                platform(0.0, g, 250.0, 50.0),
                platform(300.0, g - 70.0, 120.0, 20.0),
                platform(470.0, g - 150.0, 100.0, 20.0),
                platform(620.0, g - 230.0, 130.0, 20.0),
                platform(800.0, g - 100.0, 150.0, 20.0),
                platform(1000.0, g - 200.0, 120.0, 20.0),
                platform(1170.0, g - 270.0, 100.0, 20.0),
                platform(1320.0, g - 150.0, 180.0, 20.0),
                platform(1550.0, g - 50.0, 150.0, 20.0),
                platform(1750.0, g - 130.0, 120.0, 20.0),
                platform(1920.0, g, 200.0, 50.0),
            ],
            coins: vec![
                Vec2::new(330.0, g - 110.0),
                Vec2::new(490.0, g - 190.0),
                Vec2::new(640.0, g - 270.0),
                Vec2::new(820.0, g - 140.0),
                Vec2::new(1020.0, g - 240.0),
                Vec2::new(1190.0, g - 310.0),
                Vec2::new(1360.0, g - 190.0),
                Vec2::new(1580.0, g - 90.0),
                Vec2::new(1770.0, g - 170.0),
            ],
            enemies: vec![
                spawn(320.0, g - 90.0, 2.0),
                spawn(640.0, g - 250.0, 1.5),
                spawn(1030.0, g - 220.0, 2.5),
                spawn(1370.0, g - 170.0, 2.0),
                spawn(1770.0, g - 150.0, 1.8),
            ],
            theme_color: "#8B4513",
            enemy_color: "#8A2BE2",
        },
        LevelDef {
            name: "Rocky Ridge",
            platforms: vec![
                platform(0.0, g, 180.0, 50.0),
                platform(230.0, g - 50.0, 100.0, 20.0),
                platform(380.0, g - 130.0, 90.0, 20.0),
                platform(520.0, g - 210.0, 110.0, 20.0),
                platform(680.0, g - 290.0, 100.0, 20.0),
                platform(830.0, g - 170.0, 140.0, 20.0),
                platform(1020.0, g - 250.0, 100.0, 20.0),
                platform(1170.0, g - 330.0, 110.0, 20.0),
                platform(1330.0, g - 410.0, 120.0, 20.0),
                platform(1500.0, g - 290.0, 130.0, 20.0),
                platform(1680.0, g - 170.0, 150.0, 20.0),
                platform(1880.0, g - 50.0, 140.0, 20.0),
                platform(2070.0, g, 200.0, 50.0),
            ],
            coins: vec![
                Vec2::new(250.0, g - 90.0),
                Vec2::new(400.0, g - 170.0),
                Vec2::new(540.0, g - 250.0),
                Vec2::new(700.0, g - 330.0),
                Vec2::new(850.0, g - 210.0),
                Vec2::new(1040.0, g - 290.0),
                Vec2::new(1190.0, g - 370.0),
                Vec2::new(1350.0, g - 450.0),
                Vec2::new(1520.0, g - 330.0),
                Vec2::new(1700.0, g - 210.0),
                Vec2::new(1900.0, g - 90.0),
            ],
            enemies: vec![
                spawn(250.0, g - 70.0, 2.2),
                spawn(540.0, g - 230.0, 2.5),
                spawn(700.0, g - 310.0, 2.0),
                spawn(1050.0, g - 270.0, 2.8),
                spawn(1350.0, g - 430.0, 2.3),
                spawn(1710.0, g - 190.0, 2.6),
                spawn(1900.0, g - 70.0, 2.4),
            ],
            theme_color: "#654321",
            enemy_color: "#DC143C",
        },
        LevelDef {
            name: "Dark Cavern",
            platforms: vec![
                platform(0.0, g, 150.0, 50.0),
                platform(200.0, g - 70.0, 80.0, 20.0),
                platform(330.0, g - 150.0, 90.0, 20.0),
                platform(470.0, g - 230.0, 80.0, 20.0),
                platform(600.0, g - 310.0, 100.0, 20.0),
                platform(750.0, g - 210.0, 90.0, 20.0),
                platform(890.0, g - 290.0, 100.0, 20.0),
                platform(1040.0, g - 370.0, 90.0, 20.0),
                platform(1180.0, g - 270.0, 110.0, 20.0),
                platform(1340.0, g - 350.0, 100.0, 20.0),
                platform(1490.0, g - 430.0, 110.0, 20.0),
                platform(1650.0, g - 310.0, 120.0, 20.0),
                platform(1820.0, g - 190.0, 130.0, 20.0),
                platform(2000.0, g - 70.0, 150.0, 20.0),
                platform(2200.0, g, 250.0, 50.0),
            ],
            coins: vec![
                Vec2::new(220.0, g - 110.0),
                Vec2::new(350.0, g - 190.0),
                Vec2::new(490.0, g - 270.0),
                Vec2::new(620.0, g - 350.0),
                Vec2::new(770.0, g - 250.0),
                Vec2::new(910.0, g - 330.0),
                Vec2::new(1060.0, g - 410.0),
                Vec2::new(1200.0, g - 310.0),
                Vec2::new(1360.0, g - 390.0),
                Vec2::new(1510.0, g - 470.0),
                Vec2::new(1670.0, g - 350.0),
                Vec2::new(1840.0, g - 230.0),
                Vec2::new(2020.0, g - 110.0),
            ],
            enemies: vec![
                spawn(220.0, g - 90.0, 2.5),
                spawn(490.0, g - 250.0, 3.0),
                spawn(620.0, g - 330.0, 2.7),
                spawn(920.0, g - 310.0, 3.2),
                spawn(1200.0, g - 290.0, 2.9),
                spawn(1370.0, g - 370.0, 3.1),
                spawn(1680.0, g - 330.0, 2.8),
                spawn(1850.0, g - 210.0, 3.0),
                spawn(2030.0, g - 90.0, 2.6),
            ],
            theme_color: "#4A4A4A",
            enemy_color: "#FF6347",
        },
    ]
}
