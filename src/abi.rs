// Contract ABI definitions
// Parameter layouts for batch-executor router commands, the execute entry point,
// and the mixed-route quoter used to price candidate paths
//
// Numan Thabit 2025 Nov

use alloy::sol;

sol! {
    /// One constant-product hop as the router's V2 commands expect it.
    #[derive(Debug, PartialEq, Eq)]
    struct Route {
        address from;
        address to;
        bool stable;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct V2SwapExactInParams {
        address recipient;
        uint256 amountIn;
        uint256 amountOutMin;
        Route[] routes;
        bool payerIsUser;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct V2SwapExactOutParams {
        address recipient;
        uint256 amountOut;
        uint256 amountInMax;
        Route[] routes;
        bool payerIsUser;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct V3SwapExactInParams {
        address recipient;
        uint256 amountIn;
        uint256 amountOutMin;
        bytes path;
        bool payerIsUser;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct V3SwapExactOutParams {
        address recipient;
        uint256 amountOut;
        uint256 amountInMax;
        bytes path;
        bool payerIsUser;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct WrapNativeParams {
        address recipient;
        uint256 amountMin;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct UnwrapNativeParams {
        address recipient;
        uint256 amountMin;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct SweepParams {
        address token;
        address recipient;
        uint256 amountMin;
    }

    #[derive(Debug, PartialEq, Eq)]
    contract UniversalRouter {
        function execute(bytes commands, bytes[] inputs) external payable;
    }

    #[derive(Debug, PartialEq, Eq)]
    contract UniversalRouterDeadline {
        function execute(bytes commands, bytes[] inputs, uint256 deadline) external payable;
    }

    #[derive(Debug, PartialEq, Eq)]
    contract MixedRouteQuoter {
        function quoteExactInput(bytes path, uint256 amountIn)
            external
            returns (
                uint256 amountOut,
                uint160[] v3SqrtPriceX96AfterList,
                uint32[] v3InitializedTicksCrossedList,
                uint256 v3SwapGasEstimate
            );
    }
}
