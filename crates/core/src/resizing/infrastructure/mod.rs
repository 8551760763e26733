pub mod triangle_resizer;
