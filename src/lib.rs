#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod camera;
pub mod geom;

use std::fmt;

use board::{BoardError, ChessBoard, PieceColor, PieceKind};
use geom::SurfaceConfig;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

/// Publiek toegangspunt voor consumenten: een geanimeerd bordoppervlak met stukken.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    board: ChessBoard,
}

#[wasm_bindgen]
impl Engine {
    /// Maak een engine met de standaardconfiguratie van het oppervlak.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Engine, JsValue> {
        Self::from_config(SurfaceConfig::default()).map_err(to_js_error)
    }

    /// Maak een engine op basis van een (gedeeltelijk) configuratieobject.
    /// Weggelaten velden houden hun standaardwaarde.
    #[wasm_bindgen]
    pub fn with_config(config: JsValue) -> Result<Engine, JsValue> {
        let config: SurfaceConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|err| JsValue::from(JsError::new(&err.to_string())))?;
        Self::from_config(config).map_err(to_js_error)
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Zet de animatie `dt` verder en bemonster de mesh opnieuw.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f64) -> Result<(), JsValue> {
        if !dt.is_finite() {
            return Err(js_error("tick-interval moet een eindig getal zijn"));
        }
        self.board.tick(dt);
        Ok(())
    }

    /// Geinterleavede `position(3) uv(2) normal(3)` floats per vertex.
    #[wasm_bindgen]
    pub fn vertex_buffer(&self) -> Vec<f32> {
        self.board.surface().buffer().vertices_flat().to_vec()
    }

    #[wasm_bindgen]
    pub fn index_buffer(&self) -> Vec<u32> {
        self.board.surface().indices().to_vec()
    }

    #[wasm_bindgen]
    pub fn vertex_count(&self) -> usize {
        self.board.surface().buffer().vertex_count()
    }

    #[wasm_bindgen]
    pub fn precision(&self) -> usize {
        self.board.surface().buffer().precision()
    }

    /// Hoogte van het oppervlak onder bordveld `(row, column)`.
    #[wasm_bindgen]
    pub fn height_at(&self, row: usize, column: usize) -> Result<f64, JsValue> {
        self.board
            .surface()
            .height_at(row, column)
            .map(f64::from)
            .map_err(to_js_error)
    }

    /// Stel een inwendig controlepunt in en bemonster de mesh opnieuw.
    #[wasm_bindgen]
    pub fn set_control_point(&mut self, row: usize, column: usize, value: f64) -> Result<(), JsValue> {
        self.board
            .set_control_point(row, column, value)
            .map_err(to_js_error)
    }

    /// Plaats een stuk op naam (`"knight"`, `"q"`, ...) en kleur (`"white"`, `"b"`).
    #[wasm_bindgen]
    pub fn add_piece(
        &mut self,
        kind: &str,
        color: &str,
        column: usize,
        row: usize,
    ) -> Result<(), JsValue> {
        let kind = PieceKind::from_name(kind)
            .ok_or_else(|| to_js_error(BoardError::UnknownPiece(kind.to_owned())))?;
        let color = PieceColor::from_name(color)
            .ok_or_else(|| to_js_error(BoardError::UnknownColor(color.to_owned())))?;
        self.board
            .add_piece(kind, color, column, row)
            .map_err(to_js_error)
    }

    /// Verwijder het stuk op een veld. Geeft terug of er een stuk stond.
    #[wasm_bindgen]
    pub fn remove_piece(&mut self, column: usize, row: usize) -> Result<bool, JsValue> {
        self.board
            .remove_piece(column, row)
            .map(|piece| piece.is_some())
            .map_err(to_js_error)
    }

    /// Wereldposities van alle stukken op het huidige oppervlak.
    #[wasm_bindgen]
    pub fn get_placements(&self) -> Result<JsValue, JsValue> {
        let placements = self.board.placements().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&placements).map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.board.surface().config())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Engine {
    fn from_config(config: SurfaceConfig) -> Result<Self, BoardError> {
        Ok(Self {
            initialized: true,
            board: ChessBoard::new(config)?,
        })
    }

    /// Native access to the board behind the facade.
    #[must_use]
    pub fn board(&self) -> &ChessBoard {
        &self.board
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("engine error: {message}");
        JsValue::NULL
    }
}
