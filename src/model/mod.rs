/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/
/// Request options, responses and wire-log rendering
pub mod http;
/// Per-request timing records
pub mod timing;
/// API version negotiation
pub mod version;
