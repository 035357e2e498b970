mod draw;
mod fen;
mod movegen;
mod perft;
