//! Reusable OpenAPI responses for failure envelopes.

use crate::envelope::ErrorEnvelope;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid argument",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-10 14:03:11",
        "service": "microservicio-inventario",
        "success": false,
        "message": "La cantidad no puede ser negativa"
    })
)]
pub struct BadRequestResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-10 14:03:11",
        "service": "microservicio-inventario",
        "success": false,
        "message": "Producto no encontrado con ID: 42"
    })
)]
pub struct NotFoundResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Conflict - resource already exists",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-10 14:03:11",
        "service": "microservicio-inventario",
        "success": false,
        "message": "Ya existe un producto con el nombre: Laptop HP"
    })
)]
pub struct ConflictResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "timestamp": "2025-01-10 14:03:11",
        "service": "microservicio-inventario",
        "success": false,
        "message": "Error al listar productos",
        "error": "connection refused"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorEnvelope);
