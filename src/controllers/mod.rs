pub mod auth_controller;
pub mod efectivo_controller;
pub mod planilla_controller;
pub mod recorrido_controller;
pub mod usuario_controller;
