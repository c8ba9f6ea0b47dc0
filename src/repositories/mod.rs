pub mod efectivo_repository;
pub mod planilla_repository;
pub mod recorrido_repository;
pub mod usuario_repository;
