//! Contratos compartilhados do sistema Moldura.
//!
//! Registros do backend, regras de negócio puras (preços, status, quadro de
//! tarefas, relatórios) e a tabela de tradução. Nada aqui depende do navegador.

pub mod domain;
pub mod enums;
pub mod shared;
