//! Token de acesso gravado pelo módulo de login (externo a este app)

pub mod storage;
