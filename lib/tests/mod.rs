mod abi;
mod expression;
mod statement;
mod unknown_procedure_call;
