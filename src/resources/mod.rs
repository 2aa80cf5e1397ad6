/**
 * This module contains the logic for loading textures from external files and
 * the bind group layouts they are bound with.
 */
pub mod texture;
