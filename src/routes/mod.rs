pub mod auth_routes;
pub mod efectivo_routes;
pub mod planilla_routes;
pub mod recorrido_routes;
pub mod usuario_routes;
