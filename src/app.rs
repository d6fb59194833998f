// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// ----------------------------------------------
// - etat.rs    : Session (entrée, résultat, mémoire, historique), sans E/S
// - console.rs : boucle interactive au terminal

pub mod console;
pub mod etat;

// Ré-export pratique : `use calculatrice_sci::app::Session;`
pub use etat::{ErreurMemoire, Session};
